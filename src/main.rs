use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use cssd_roster::add::{handle_add_symbol_command, handle_edit_symbol_command, SymbolArgs};
use cssd_roster::api::HttpBackend;
use cssd_roster::calendar::HolidayTable;
use cssd_roster::config::Config;
use cssd_roster::delete::handle_delete_symbol_command;
use cssd_roster::query::{
    handle_day_command, handle_grid_command, handle_hours_command, handle_legend_command,
};
use cssd_roster::schedule::{Category, MasterKind};
use cssd_roster::utils::{mask_token, resolve_date, resolve_month};
use cssd_roster::{interactive, logging};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_DATE"), ")");

#[derive(Parser)]
#[command(name = "cssd-roster")]
#[command(about = "CSSD staff roster: month grid, day list and legend editor", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the month grid
    Grid {
        /// Month number, 1-12 (default: current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Print every employee's assignment for one day
    Day {
        /// Date (YYYY-MM-DD, default: today)
        #[arg(short = 'D', long)]
        date: Option<String>,
    },
    /// Print the symbol legend
    Legend {
        /// Only one section: primary, task or leave
        #[arg(short, long)]
        category: Option<Category>,

        /// Show text colors and backend ids
        #[arg(short, long)]
        verbose: bool,
    },
    /// Add a symbol to the legend
    AddSymbol {
        /// Section: primary, task or leave
        #[arg(short, long)]
        category: Category,

        /// Code, 1 to 4 characters
        #[arg(long)]
        code: String,

        /// Description shown next to the code
        #[arg(short, long)]
        name: String,

        /// Background color (#RRGGBB, default: #6366f1)
        #[arg(long)]
        color: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Change a stored symbol
    EditSymbol {
        /// Section the symbol is edited in: primary, task or leave
        #[arg(short, long)]
        category: Category,

        /// Backend id of the symbol
        #[arg(long)]
        id: String,

        #[arg(long)]
        code: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(long)]
        color: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a stored symbol
    DeleteSymbol {
        /// Master list: shift or unit
        #[arg(short, long)]
        kind: MasterKind,

        /// Backend id of the symbol
        #[arg(long)]
        id: Option<String>,

        /// Look the symbol up by code instead
        #[arg(long)]
        code: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Working hours of a shift
    Hours {
        /// Start time (HH:MM)
        #[arg(short, long)]
        start: String,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: String,

        /// Shift code; P on a weekend always counts 7 hours
        #[arg(long)]
        shift: Option<String>,

        /// Date of the shift (YYYY-MM-DD)
        #[arg(short = 'D', long)]
        date: Option<String>,
    },
    /// Show or change the configuration
    Config {
        /// Backend base URL, e.g. http://localhost:3000/api
        #[arg(long)]
        api_url: Option<String>,

        /// Access token sent as a bearer token
        #[arg(long)]
        token: Option<String>,

        /// Your employee number (NIP)
        #[arg(long)]
        nip: Option<String>,

        /// Whether you may edit schedules and the legend
        #[arg(long)]
        can_edit: Option<bool>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let command = match cli.command {
        Some(command) => command,
        None => {
            // Console output would corrupt the terminal UI
            let _guard = logging::init_with_file("cssd-roster.log")
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            let config = Config::load()?;
            return interactive::run_interactive(config).await;
        }
    };

    logging::init();

    match command {
        Commands::Grid { month, year } => {
            let (config, backend) = connect()?;
            let (year, month) = resolve_month(month, year)?;
            let holidays = HolidayTable::load_optional(Config::get_holidays_path().as_deref());
            handle_grid_command(&backend, &config, &holidays, year, month).await
        }
        Commands::Day { date } => {
            let (config, backend) = connect()?;
            let date = resolve_date(date.as_deref())?;
            handle_day_command(&backend, &config, date).await
        }
        Commands::Legend { category, verbose } => {
            let (_, backend) = connect()?;
            handle_legend_command(&backend, category, verbose).await
        }
        Commands::AddSymbol {
            category,
            code,
            name,
            color,
            yes,
        } => {
            let (config, backend) = connect()?;
            let args = SymbolArgs {
                code: Some(code),
                name: Some(name),
                color,
            };
            handle_add_symbol_command(&backend, &config, category, args, yes).await
        }
        Commands::EditSymbol {
            category,
            id,
            code,
            name,
            color,
            yes,
        } => {
            let (config, backend) = connect()?;
            let args = SymbolArgs { code, name, color };
            handle_edit_symbol_command(&backend, &config, category, &id, args, yes).await
        }
        Commands::DeleteSymbol {
            kind,
            id,
            code,
            yes,
        } => {
            let (config, backend) = connect()?;
            handle_delete_symbol_command(&backend, &config, kind, id, code, yes).await
        }
        Commands::Hours {
            start,
            end,
            shift,
            date,
        } => handle_hours_command(&start, &end, shift.as_deref(), date.as_deref()),
        Commands::Config {
            api_url,
            token,
            nip,
            can_edit,
        } => handle_config_command(api_url, token, nip, can_edit),
    }
}

fn connect() -> Result<(Config, HttpBackend)> {
    let config = Config::load()?;
    tracing::debug!(api_url = %config.api_url, "using roster backend");
    let backend = HttpBackend::from_config(&config);
    Ok((config, backend))
}

fn handle_config_command(
    api_url: Option<String>,
    token: Option<String>,
    nip: Option<String>,
    can_edit: Option<bool>,
) -> Result<()> {
    let path = Config::get_config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine the configuration directory"))?;
    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };

    let changed = api_url.is_some() || token.is_some() || nip.is_some() || can_edit.is_some();
    if let Some(url) = api_url {
        config.api_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(token) = token {
        config.api_token = Some(token);
    }
    if let Some(nip) = nip {
        config.user_nip = Some(nip.trim().to_string());
    }
    if let Some(can_edit) = can_edit {
        config.can_edit = can_edit;
    }

    if changed {
        config.validate()?;
        config.save_to(&path)?;
        tracing::info!(path = %path.display(), "configuration saved");
        println!("Konfigurasi disimpan ke {}", path.display());
    }

    println!("API URL:  {}", config.api_url);
    println!(
        "Token:    {}",
        config.api_token.as_deref().map(mask_token).unwrap_or_else(|| "-".to_string())
    );
    println!("NIP:      {}", config.user_nip.as_deref().unwrap_or("-"));
    println!("Edit:     {}", if config.can_edit { "ya" } else { "tidak" });
    Ok(())
}
