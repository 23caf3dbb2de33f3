//! Borrowing Capacity CLI
//!
//! Simulates every financing scenario for a client profile and prints them ranked by
//! borrowing capacity.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use borrowing_capacity::household::{DwellingType, NotaryRegime, Zone};
use borrowing_capacity::profile::{ClientProfile, PropertyCategory};
use borrowing_capacity::report::{format_inputs, format_report};
use borrowing_capacity::zoning::DEFAULT_ZONING_PATH;
use borrowing_capacity::{EligibilityTables, SimulationConfig, Simulator, ZoneMap};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CategoryArg {
    NewBuild,
    Recent,
    Existing,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DwellingArg {
    Apartment,
    House,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NotaryArg {
    None,
    Reduced,
}

#[derive(Parser, Debug)]
#[command(
    name = "borrowing_capacity",
    about = "Maximum property price by financing scenario (amortizing loan, zero-interest loan, employer loan)"
)]
struct Cli {
    #[arg(long, help = "Saved client profile (JSON); flags below override its fields")]
    profile: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_ZONING_PATH, help = "Zone map (JSON)")]
    zoning: PathBuf,

    #[arg(long, help = "Directory with ceiling table CSVs; compiled-in tables when omitted")]
    tables: Option<PathBuf>,

    #[arg(long, help = "Net monthly salary")]
    salary: Option<f64>,
    #[arg(long, help = "Monthly rental income")]
    property_income: Option<f64>,
    #[arg(long, help = "Monthly financial income")]
    financial_income: Option<f64>,
    #[arg(long)]
    consumer_credit: Option<f64>,
    #[arg(long)]
    property_credit: Option<f64>,
    #[arg(long)]
    leasing: Option<f64>,
    #[arg(long, help = "Savings available as contribution")]
    liquidity: Option<f64>,
    #[arg(long, help = "Maximum debt-to-income ratio in percent")]
    debt_ratio: Option<f64>,
    #[arg(long, help = "Reference fiscal income of year N-2")]
    reference_income: Option<f64>,
    #[arg(long)]
    household_size: Option<u32>,

    #[arg(long, help = "Annual interest rate in percent")]
    rate: Option<f64>,
    #[arg(long, help = "Annual insurance rate in percent")]
    insurance: Option<f64>,
    #[arg(long, help = "Loan duration in years")]
    duration: Option<u32>,

    #[arg(long, help = "Department code of the property")]
    department: Option<String>,
    #[arg(long, help = "Commune of the property")]
    commune: Option<String>,
    #[arg(long, help = "Force the zone (A bis, A, B1, B2, C)")]
    zone: Option<Zone>,

    #[arg(long, value_enum)]
    category: Option<CategoryArg>,
    #[arg(long, value_enum)]
    dwelling: Option<DwellingArg>,
    #[arg(long, value_enum)]
    notary: Option<NotaryArg>,
    #[arg(long, help = "Also simulate the reduced VAT rate (new builds)")]
    reduced_vat: bool,
    #[arg(long, help = "Planned renovation cost (existing dwellings)")]
    renovation_cost: Option<f64>,

    #[arg(long, help = "Upper bound of the price search")]
    search_max: Option<f64>,
    #[arg(long, help = "Maximum contribution as a share of the price, e.g. 0.1")]
    contribution_share: Option<f64>,
    #[arg(long, help = "Notional rate in percent for the zero-interest loan monthly equivalent")]
    zero_interest_rate: Option<f64>,
    #[arg(long, help = "Solve scenarios on a single thread")]
    sequential: bool,

    #[arg(long, help = "Show only the N best scenarios")]
    top: Option<usize>,
    #[arg(long, help = "Print results as JSON")]
    json: bool,
    #[arg(long, help = "Save the effective profile into this directory as client_YYYY-MM-DD.json")]
    save_profile: Option<PathBuf>,
}

impl Cli {
    fn client_profile(&self) -> Result<ClientProfile> {
        let mut profile = match &self.profile {
            Some(path) => ClientProfile::load(path)
                .with_context(|| format!("Failed to load client profile {}", path.display()))?,
            None => ClientProfile::default(),
        };

        let set = |target: &mut f64, value: Option<f64>| {
            if let Some(v) = value {
                *target = v;
            }
        };
        set(&mut profile.income.salary, self.salary);
        set(&mut profile.income.property_income, self.property_income);
        set(&mut profile.income.financial_income, self.financial_income);
        set(&mut profile.charges.consumer_credit, self.consumer_credit);
        set(&mut profile.charges.property_credit, self.property_credit);
        set(&mut profile.charges.leasing, self.leasing);
        set(&mut profile.liquidity, self.liquidity);
        set(&mut profile.debt_ratio_pct, self.debt_ratio);
        set(&mut profile.reference_income, self.reference_income);
        set(&mut profile.loan.annual_rate_pct, self.rate);
        set(&mut profile.loan.insurance_rate_pct, self.insurance);

        if let Some(size) = self.household_size {
            profile.household_size = size;
        }
        if let Some(duration) = self.duration {
            profile.loan.duration_years = duration;
        }
        if let Some(department) = &self.department {
            profile.division = department.clone();
        }
        if let Some(commune) = &self.commune {
            profile.subdivision = commune.clone();
        }
        if self.zone.is_some() {
            profile.zone = self.zone;
        }
        if let Some(category) = self.category {
            profile.category = match category {
                CategoryArg::NewBuild => PropertyCategory::NewBuild,
                CategoryArg::Recent => PropertyCategory::Recent,
                CategoryArg::Existing => PropertyCategory::Existing,
            };
        }
        if let Some(dwelling) = self.dwelling {
            profile.dwelling = Some(match dwelling {
                DwellingArg::Apartment => DwellingType::Apartment,
                DwellingArg::House => DwellingType::House,
            });
        }
        if let Some(notary) = self.notary {
            profile.notary = Some(match notary {
                NotaryArg::None => NotaryRegime::None,
                NotaryArg::Reduced => NotaryRegime::Reduced,
            });
        }
        if self.reduced_vat {
            profile.test_reduced_vat = true;
        }
        if let Some(cost) = self.renovation_cost {
            profile.renovation_planned = true;
            profile.renovation_cost = cost;
        }
        Ok(profile)
    }

    fn config(&self) -> Result<SimulationConfig> {
        let mut config = SimulationConfig::default();
        if let Some(max) = self.search_max {
            if !max.is_finite() || max <= config.solver.search_min {
                bail!("--search-max must exceed {}, got {}", config.solver.search_min, max);
            }
            config.solver.search_max = max;
        }
        if let Some(share) = self.contribution_share {
            if !(0.0..=1.0).contains(&share) {
                bail!("--contribution-share must be between 0 and 1, got {}", share);
            }
            config.solver.contribution_share = share;
        }
        if self.zero_interest_rate.is_some() {
            config.solver.zero_interest_notional_rate_pct = self.zero_interest_rate;
        }
        config.parallel = !self.sequential;
        Ok(config)
    }
}

fn load_zones(path: &Path) -> Result<ZoneMap> {
    if !path.exists() {
        log::warn!("zone map {} not found, every location resolves to zone C", path.display());
        return Ok(ZoneMap::new());
    }
    ZoneMap::from_json_path(path).with_context(|| format!("Failed to load zone map {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let profile = cli.client_profile()?;
    let zones = load_zones(&cli.zoning)?;
    let (household, acquisition) = profile
        .to_inputs(&zones)
        .context("Client profile is not usable")?;

    let tables = match &cli.tables {
        Some(dir) => EligibilityTables::from_csv_path(dir)
            .with_context(|| format!("Failed to load ceiling tables from {}", dir.display()))?,
        None => EligibilityTables::default_2024(),
    };
    let simulator = Simulator::with_tables(tables, cli.config()?);
    let results = simulator.simulate(&household, &acquisition);

    if let Some(dir) = &cli.save_profile {
        let path = dir.join(ClientProfile::default_file_name_today());
        profile
            .save(&path)
            .with_context(|| format!("Failed to save client profile {}", path.display()))?;
        eprintln!("Profile saved to {}", path.display());
    }

    if cli.json {
        let shown = cli.top.unwrap_or(results.len()).min(results.len());
        println!("{}", serde_json::to_string_pretty(&results[..shown])?);
        return Ok(());
    }

    println!("Borrowing Capacity v{}", env!("CARGO_PKG_VERSION"));
    println!("========================\n");
    println!("{}", format_inputs(&household, &acquisition));
    println!("{} feasible scenarios\n", results.len());
    print!("{}", format_report(&results, cli.top));
    Ok(())
}
