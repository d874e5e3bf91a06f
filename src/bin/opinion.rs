//! Command-line front end for binomial opinions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use subjective_logic::{
    BaseRatePolicy, BinomialOpinion, FusionOperator, DEFAULT_BASE_RATE, DEFAULT_PRIOR_WEIGHT,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print the resulting opinion as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an opinion from belief, disbelief and uncertainty
    Create {
        #[arg(allow_negative_numbers = true)]
        belief: f64,
        #[arg(allow_negative_numbers = true)]
        disbelief: f64,
        #[arg(allow_negative_numbers = true)]
        uncertainty: f64,
        /// Prior probability of the proposition
        #[arg(long, default_value_t = DEFAULT_BASE_RATE)]
        base_rate: f64,
    },
    /// Create an opinion from positive and negative evidence counts
    Evidence {
        /// Positive evidence
        #[arg(allow_negative_numbers = true)]
        r: f64,
        /// Negative evidence
        #[arg(allow_negative_numbers = true)]
        s: f64,
        /// Prior probability of the proposition
        #[arg(long, default_value_t = DEFAULT_BASE_RATE)]
        base_rate: f64,
        /// Non-informative prior weight
        #[arg(long, default_value_t = DEFAULT_PRIOR_WEIGHT)]
        prior_weight: f64,
    },
    /// Fuse two opinions given as JSON objects
    Fuse {
        /// First opinion, e.g. '{"belief":0.5,"disbelief":0.3,"uncertainty":0.2}'
        left: String,
        /// Second opinion
        right: String,
        /// Fusion rule
        #[arg(long, value_enum, default_value_t = OperatorArg::Cumulative)]
        operator: OperatorArg,
        /// Fail instead of combining when the base rates differ
        #[arg(long)]
        require_equal_base_rates: bool,
    },
    /// Discount an opinion by trust in its source
    Discount {
        /// Trust in the source, as a JSON opinion
        trust: String,
        /// The source's opinion, as a JSON opinion
        opinion: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum OperatorArg {
    Cumulative,
    Averaging,
}

impl From<OperatorArg> for FusionOperator {
    fn from(arg: OperatorArg) -> Self {
        match arg {
            OperatorArg::Cumulative => Self::Cumulative,
            OperatorArg::Averaging => Self::Averaging,
        }
    }
}

fn parse_opinion(label: &str, json: &str) -> Result<BinomialOpinion> {
    BinomialOpinion::from_json_str(json).with_context(|| format!("invalid {label} opinion"))
}

fn run(cli: Cli) -> Result<BinomialOpinion> {
    let opinion = match cli.command {
        Commands::Create {
            belief,
            disbelief,
            uncertainty,
            base_rate,
        } => BinomialOpinion::new(belief, disbelief, uncertainty, base_rate)?,
        Commands::Evidence {
            r,
            s,
            base_rate,
            prior_weight,
        } => BinomialOpinion::from_evidence_with_prior(r, s, base_rate, prior_weight)?,
        Commands::Fuse {
            left,
            right,
            operator,
            require_equal_base_rates,
        } => {
            let left = parse_opinion("left", &left)?;
            let right = parse_opinion("right", &right)?;
            let policy = if require_equal_base_rates {
                BaseRatePolicy::RequireEqual
            } else {
                BaseRatePolicy::Combine
            };
            info!("fusing {left} and {right} ({}, {policy})", FusionOperator::from(operator));
            left.fuse(&right, operator.into(), policy)?
        }
        Commands::Discount { trust, opinion } => {
            let trust = parse_opinion("trust", &trust)?;
            let opinion = parse_opinion("source", &opinion)?;
            trust.discount(&opinion)?
        }
    };
    Ok(opinion)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(opinion) if json => println!("{}", opinion.to_json()),
        Ok(opinion) => {
            println!("{opinion}");
            println!("projected_probability={:.3}", opinion.projected_probability());
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
