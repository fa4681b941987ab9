use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_organize::{PageNumberOptions, PageNumberingPlan, PageSequenceEditor};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdft", about = "PDF tools CLI", version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reorder, rotate and delete pages
    Organize {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Move page FROM into the slot of page TO (1-based, repeatable, applied in order)
        #[arg(long = "move", value_name = "FROM:TO", value_parser = parse_move)]
        moves: Vec<(usize, usize)>,

        /// Rotate pages clockwise, e.g. "1-3,7:90" (repeatable)
        #[arg(long = "rotate", value_name = "PAGES:DEGREES", value_parser = parse_rotation)]
        rotations: Vec<(String, i32)>,

        /// Pages to delete, e.g. "2,5-6"
        #[arg(long)]
        delete: Option<String>,

        /// Print the resulting page order without writing a PDF
        #[arg(long)]
        dry_run: bool,
    },

    /// Stamp page numbers
    Number {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Load numbering options from a JSON file (flags below override it)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the effective numbering options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Numeral style
        #[arg(long, value_enum)]
        style: Option<StyleArg>,

        /// Label template
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Number given to the first counted page
        #[arg(long, allow_hyphen_values = true)]
        start: Option<i64>,

        /// Pages that get no number and are not counted, e.g. "1-2"
        #[arg(long)]
        exclude: Option<String>,

        /// Pages that are counted but not labelled, e.g. "3"
        #[arg(long)]
        skip: Option<String>,

        /// Label position
        #[arg(long, value_enum)]
        position: Option<PositionArg>,

        /// Font size in points
        #[arg(long)]
        font_size: Option<f32>,

        /// Distance from the page edge in mm
        #[arg(long)]
        margin: Option<f32>,

        /// Print the labels without writing a PDF
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Decimal,
    UpperRoman,
    LowerRoman,
    UpperAlpha,
    LowerAlpha,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Number,
    PageOfTotal,
    PageX,
    Brackets,
    Dashes,
}

#[derive(Clone, Copy, ValueEnum)]
enum PositionArg {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl From<StyleArg> for pdf_organize::NumberStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Decimal => Self::Decimal,
            StyleArg::UpperRoman => Self::UpperRoman,
            StyleArg::LowerRoman => Self::LowerRoman,
            StyleArg::UpperAlpha => Self::UpperAlpha,
            StyleArg::LowerAlpha => Self::LowerAlpha,
        }
    }
}

impl From<FormatArg> for pdf_organize::NumberFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Number => Self::Number,
            FormatArg::PageOfTotal => Self::PageOfTotal,
            FormatArg::PageX => Self::PageX,
            FormatArg::Brackets => Self::Brackets,
            FormatArg::Dashes => Self::Dashes,
        }
    }
}

impl From<PositionArg> for pdf_organize::Position {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::TopLeft => Self::TopLeft,
            PositionArg::TopCenter => Self::TopCenter,
            PositionArg::TopRight => Self::TopRight,
            PositionArg::BottomLeft => Self::BottomLeft,
            PositionArg::BottomCenter => Self::BottomCenter,
            PositionArg::BottomRight => Self::BottomRight,
        }
    }
}

fn parse_move(s: &str) -> std::result::Result<(usize, usize), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{}'", s))?;
    let page = |v: &str| match v.trim().parse::<usize>() {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(format!("invalid page '{}'", v)),
    };
    Ok((page(from)?, page(to)?))
}

fn parse_rotation(s: &str) -> std::result::Result<(String, i32), String> {
    let (pages, degrees) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected PAGES:DEGREES, got '{}'", s))?;
    let degrees = degrees
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("invalid rotation '{}'", degrees))?;
    Ok((pages.to_string(), degrees))
}

/// Convert 1-based page numbers from the command line to source indices
fn to_source_indices(pages: impl IntoIterator<Item = usize>) -> Vec<usize> {
    pages.into_iter().map(|p| p - 1).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Organize {
            input,
            output,
            moves,
            rotations,
            delete,
            dry_run,
        } => {
            let source = pdf_organize::load_pdf(&input)
                .await
                .with_context(|| format!("Failed to load {}", input.display()))?;
            let mut editor = PageSequenceEditor::load(pdf_organize::page_count(&source))?;

            for (from, to) in moves {
                editor
                    .move_to(from - 1, to - 1)
                    .with_context(|| format!("Cannot move page {} to {}", from, to))?;
            }

            for (pages, degrees) in rotations {
                let pages = pdf_organize::parse_page_list(&pages)?;
                editor.clear_selection()?;
                for index in to_source_indices(pages) {
                    editor.set_selected(index, true)?;
                }
                let rotated = editor.rotate_selected(degrees)?;
                log::info!("Rotated {} pages by {}°", rotated, degrees);
            }
            editor.clear_selection()?;

            if let Some(delete) = delete {
                let pages = pdf_organize::parse_page_list(&delete)?;
                editor.mark_deleted(to_source_indices(pages))?;
            }

            let order = editor.finalize()?;
            let sequence: Vec<usize> = order.iter().map(|e| e.source_index + 1).collect();
            println!("Organize:");
            println!("  Source pages: {}", pdf_organize::page_count(&source));
            println!("  Output pages: {}", order.len());
            println!(
                "  Page order: {}",
                pdf_organize::format_page_sequence(&sequence)
            );
            let rotated: Vec<usize> = order
                .iter()
                .filter(|e| e.rotation_delta != 0)
                .map(|e| e.source_index + 1)
                .collect();
            if !rotated.is_empty() {
                println!(
                    "  Rotated pages: {}",
                    pdf_organize::format_page_ranges(rotated)
                );
            }

            if dry_run {
                return Ok(());
            }

            let organized = pdf_organize::organize(&source, order).await?;
            pdf_organize::save_pdf(organized, &output).await?;
            println!("Organized → {}", output.display());
        }

        Commands::Number {
            input,
            output,
            config,
            save_config,
            style,
            format,
            start,
            exclude,
            skip,
            position,
            font_size,
            margin,
            dry_run,
        } => {
            let mut options = match config {
                Some(path) => PageNumberOptions::load(&path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => PageNumberOptions::default(),
            };
            if let Some(style) = style {
                options.style = style.into();
            }
            if let Some(format) = format {
                options.format = format.into();
            }
            if let Some(start) = start {
                options.start_from = start;
            }
            if let Some(exclude) = exclude {
                options.exclude = pdf_organize::parse_page_list(&exclude)?;
            }
            if let Some(skip) = skip {
                options.skip = pdf_organize::parse_page_list(&skip)?;
            }
            if let Some(position) = position {
                options.position = position.into();
            }
            if let Some(font_size) = font_size {
                options.font_size = font_size;
            }
            if let Some(margin) = margin {
                options.margin_mm = margin;
            }
            options.validate()?;

            if let Some(path) = save_config {
                options.save(&path).await?;
                println!("Saved options → {}", path.display());
            }

            let doc = pdf_organize::load_pdf(&input)
                .await
                .with_context(|| format!("Failed to load {}", input.display()))?;
            let total = pdf_organize::page_count(&doc);
            if total == 0 {
                bail!("{} has no pages", input.display());
            }

            let plan = PageNumberingPlan::new(total, &options);
            println!("Page numbers:");
            println!("  Pages: {}", total);
            println!("  Counted pages: {}", plan.denominator());
            println!("  Labelled pages: {}", plan.labelled_ranges());

            if dry_run {
                for label in plan.labels() {
                    match label.text {
                        Some(text) => println!("  {:>4}: {}", label.position, text),
                        None => println!("  {:>4}: -", label.position),
                    }
                }
                return Ok(());
            }

            let (numbered, stamped) = pdf_organize::number_pages(doc, &options).await?;
            pdf_organize::save_pdf(numbered, &output).await?;
            println!("Numbered {} pages → {}", stamped, output.display());
        }
    }

    Ok(())
}
