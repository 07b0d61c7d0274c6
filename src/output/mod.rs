mod csv;
mod format;
mod json;
mod table;

pub(crate) use csv::{MatrixFile, render_matrix, write_matrices};
pub(crate) use json::output_top_json;
pub(crate) use table::{TopTableOptions, print_summary_line, print_top_table};
