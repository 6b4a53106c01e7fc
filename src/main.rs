use clap::{Parser, Subcommand};
use hotbar_palettes::{Direction, JobId, JsonFile, Namespace, PaletteRef, Palettes, Settings};
use std::path::PathBuf;

/// Manage hotbar and crossbar palettes stored in a settings file.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Settings document; created on first write.
    #[arg(long, default_value = "palettes.json")]
    settings: PathBuf,
    #[arg(long, default_value_t = 1)]
    job: u32,
    /// Work on the controller crossbar instead of the hotbars.
    #[arg(long)]
    crossbar: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    List,
    Create { name: String },
    Delete { name: String },
    Rename { old: String, new: String },
    /// Move a palette one place towards the front (or back with --later).
    Move {
        name: String,
        #[arg(long)]
        later: bool,
    },
    /// Copy a palette (or the base slots, when no source is given) to another job.
    Copy {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to_job: Option<u32>,
        #[arg(long)]
        to: Option<String>,
    },
    Active,
    Select { name: String },
    Cycle {
        #[arg(long)]
        back: bool,
    },
    Validate,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> hotbar_palettes::Result<()> {
    let ns = if cli.crossbar { Namespace::Crossbar } else { Namespace::Hotbar };
    let job = JobId::new(cli.job);
    let settings = Settings::load(&cli.settings)?;
    let mut palettes = Palettes::new(settings, JsonFile::new(&cli.settings));
    // the selection only lives in memory; this recalls the job's last palette
    palettes.validate_for_job(ns, job)?;

    match cli.command {
        Command::List => {
            let active = palettes.active(ns).cloned();
            for name in palettes.list(ns, job) {
                let marker = if Some(&name) == active.as_ref() { '*' } else { ' ' };
                println!("{marker} {name}");
            }
        }
        Command::Create { name } => {
            let name = palettes.create(ns, job, &name)?;
            println!("created {name}");
        }
        Command::Delete { name } => palettes.delete(ns, job, &name)?,
        Command::Rename { old, new } => {
            palettes.rename(ns, job, &old, &new)?;
        }
        Command::Move { name, later } => {
            let direction = if later { Direction::Forward } else { Direction::Back };
            let at = palettes.move_palette(ns, job, &name, direction)?;
            println!("{name} is now at position {}", at + 1);
        }
        Command::Copy { from, to_job, to } => {
            let to_job = to_job.map_or(job, JobId::new);
            palettes.copy(
                ns,
                PaletteRef { job, name: from.as_deref() },
                PaletteRef { job: to_job, name: to.as_deref() },
            )?;
        }
        Command::Active => match palettes.active(ns) {
            Some(name) => println!("{name}"),
            None => println!("(none)"),
        },
        Command::Select { name } => {
            if !palettes.exists(ns, job, &name) {
                return Err(hotbar_palettes::PaletteError::NotFound(name));
            }
            palettes.set_active(ns, Some(&name), Some(job));
        }
        Command::Cycle { back } => {
            let direction = if back { Direction::Back } else { Direction::Forward };
            match palettes.cycle(ns, direction, job) {
                Some(name) => println!("{name}"),
                None => println!("nothing to cycle through"),
            }
        }
        Command::Validate => {}
    }
    Ok(())
}
