use std::path::PathBuf;
use std::time::Instant;

use crate::cli::{Cli, Commands, SubjectKind, parse_command};
use crate::consts::{ARTISTS_FILE, DATE_FORMAT, SONGS_FILE};
use crate::core::{
    Aggregation, DateFilter, PeriodLabel, Variant, aggregate, build_axis, filter_plays, sort_plays,
    top_subjects,
};
use crate::error::AppError;
use crate::output::{
    MatrixFile, TopTableOptions, output_top_json, print_summary_line, print_top_table,
    render_matrix, write_matrices,
};
use crate::source::DataLoader;
use crate::utils::{Timezone, debug_enabled, parse_date};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) data_dir: PathBuf,
    pub(crate) filter: DateFilter,
    pub(crate) timezone: Timezone,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn from_cli(cli: &'a Cli) -> Result<Self, AppError> {
        let since = cli.since.as_deref().map(parse_date).transpose()?;
        let until = cli.until.as_deref().map(parse_date).transpose()?;
        let timezone = Timezone::parse(cli.timezone.as_deref())?;
        Ok(CommandContext {
            cli,
            data_dir: cli.data_dir(),
            filter: DateFilter::new(since, until),
            timezone,
        })
    }
}

/// Everything both commands need from one pass over the input
struct Prepared {
    aggregation: Aggregation,
    play_count: usize,
    file_count: usize,
    elapsed_ms: f64,
}

/// Load → sort → filter → aggregate. Fails before any output when nothing is left.
fn prepare(ctx: &CommandContext<'_>) -> Result<(Prepared, Vec<PeriodLabel>), AppError> {
    let quiet = ctx.cli.quiet;
    let debug = debug_enabled() && !quiet;

    let loaded = DataLoader::new(quiet, debug).load(&ctx.data_dir)?;
    let file_count = loaded.file_count;
    if debug {
        for variant in Variant::ALL {
            eprintln!(
                "[DEBUG] {:<18} {}",
                variant.label(),
                loaded.variants.get(&variant).copied().unwrap_or(0)
            );
        }
    }
    let mut plays = loaded.plays;

    let sort_start = Instant::now();
    sort_plays(&mut plays);
    if debug {
        eprintln!(
            "[DEBUG] Sorted {} plays ({:.2}ms)",
            plays.len(),
            sort_start.elapsed().as_secs_f64() * 1000.0
        );
    }

    let before = plays.len();
    let plays = filter_plays(plays, &ctx.filter, ctx.timezone);
    if !ctx.filter.is_unbounded() && !quiet {
        let bound = |d: Option<chrono::NaiveDate>| {
            d.map_or_else(|| "*".to_string(), |d| d.format(DATE_FORMAT).to_string())
        };
        eprintln!(
            "Kept {} of {} plays between {} and {}",
            plays.len(),
            before,
            bound(ctx.filter.since),
            bound(ctx.filter.until)
        );
    }

    let axis = build_axis(&plays, ctx.timezone)?;

    let agg_start = Instant::now();
    let aggregation = aggregate(&plays, ctx.timezone);
    if !quiet {
        eprintln!(
            "Aggregated {} tracks and {} artists over {} weeks ({:.2}ms)",
            aggregation.tracks.len(),
            aggregation.artists.len(),
            axis.len(),
            agg_start.elapsed().as_secs_f64() * 1000.0
        );
    }

    Ok((
        Prepared {
            aggregation,
            play_count: plays.len(),
            file_count,
            elapsed_ms: loaded.elapsed_ms,
        },
        axis,
    ))
}

fn handle_export(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let start = Instant::now();
    let (prepared, axis) = prepare(ctx)?;
    let out_dir = ctx.cli.output_dir();

    // Render both before writing either so a failure leaves no half-finished pair
    let files = [
        MatrixFile::new(
            &out_dir,
            SONGS_FILE,
            render_matrix(&prepared.aggregation.tracks, &axis),
        ),
        MatrixFile::new(
            &out_dir,
            ARTISTS_FILE,
            render_matrix(&prepared.aggregation.artists, &axis),
        ),
    ];
    write_matrices(&files)?;

    if !ctx.cli.quiet {
        for file in &files {
            eprintln!("Saved {}", file.path.display());
        }
        if debug_enabled() {
            eprintln!(
                "[DEBUG] Axis {} .. {}, load took {:.2}ms",
                axis.first().map_or("", |l| l.as_str()),
                axis.last().map_or("", |l| l.as_str()),
                prepared.elapsed_ms
            );
        }
        print_summary_line(
            prepared.play_count,
            prepared.file_count,
            Some(start.elapsed().as_secs_f64() * 1000.0),
            ctx.cli.use_color(),
        );
    }
    Ok(())
}

fn handle_top(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let start = Instant::now();
    let (prepared, _axis) = prepare(ctx)?;

    let series = match ctx.cli.by {
        SubjectKind::Artist => &prepared.aggregation.artists,
        SubjectKind::Track => &prepared.aggregation.tracks,
    };
    let top = top_subjects(series, ctx.cli.limit());

    if ctx.cli.json {
        println!("{}", output_top_json(&top)?);
        return Ok(());
    }

    print_top_table(
        &top,
        TopTableOptions {
            use_color: ctx.cli.use_color(),
            subject_label: ctx.cli.by.label(),
        },
    );
    if !ctx.cli.quiet {
        print_summary_line(
            prepared.play_count,
            prepared.file_count,
            Some(start.elapsed().as_secs_f64() * 1000.0),
            ctx.cli.use_color(),
        );
    }
    Ok(())
}

pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let ctx = CommandContext::from_cli(cli)?;
    match parse_command(cli.command) {
        Commands::Export => handle_export(&ctx),
        Commands::Top => handle_top(&ctx),
    }
}
