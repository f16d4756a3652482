use anyhow::{bail, Context};
use clap::Parser;
use env_logger::{Builder, Env};
use infosel::entropy::LogDetMethod;
use infosel::greedy::utils::non_finite;
use infosel::greedy::{CandidateSet, GreedySelector, SelectionResult, UtilityMode};
use linfa::ParamGuard;
use log::info;
use ndarray::{Array1, Array2};
use ndarray_npy::read_npy;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Greedy sensor placement over a GP posterior covariance
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Covariance matrix (n, n) of the candidates as .npy file
    #[arg(long)]
    cov: PathBuf,
    /// Candidate locations (n, 2) as .npy file
    #[arg(long)]
    locs: PathBuf,
    /// Candidate output types (n,) as .npy file of floats (default: all 0)
    #[arg(long)]
    types: Option<PathBuf>,
    /// Already sampled candidates (n,) as .npy file of floats, non zero meaning sampled
    #[arg(long)]
    sampled: Option<PathBuf>,
    /// Number of samples to select
    #[arg(short, long, default_value_t = 10)]
    num_samples: usize,
    /// Utility: entropy or mutual_information
    #[arg(short, long, default_value = "entropy")]
    utility: String,
    /// Allow measuring several output types at the same location
    #[arg(long)]
    homotopic: bool,
    /// Tolerance on coordinates to consider two candidates co-located
    #[arg(long, default_value_t = 0.)]
    colocation_tol: f64,
    /// Use eigenvalues log-determinant with the given eigenvalue floor
    #[arg(long)]
    eigen_floor: Option<f64>,
    /// Output json file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Utility value written as a json number, or as "inf", "-inf", "nan" when degenerate
#[derive(Debug, PartialEq, Serialize)]
struct ReportValue(#[serde(serialize_with = "non_finite::serialize")] f64);

#[derive(Serialize)]
struct Report {
    utility: String,
    heterotopic: bool,
    samples: Vec<usize>,
    output_types: Vec<usize>,
    locations: Vec<[f64; 2]>,
    utilities: Vec<ReportValue>,
    gains: Vec<ReportValue>,
}

impl Report {
    fn new(
        res: &SelectionResult<f64>,
        candidates: &CandidateSet<f64>,
        utility: UtilityMode,
        heterotopic: bool,
    ) -> Self {
        Report {
            utility: utility.to_string(),
            heterotopic,
            samples: res.indices(),
            output_types: res.output_types(candidates).to_vec(),
            locations: res
                .locations(candidates)
                .rows()
                .into_iter()
                .map(|r| [r[0], r[1]])
                .collect(),
            utilities: res.utilities().iter().map(|&u| ReportValue(u)).collect(),
            gains: res.marginal_gains().iter().map(|&g| ReportValue(g)).collect(),
        }
    }
}

fn read_flags(path: &Path) -> anyhow::Result<Array1<f64>> {
    read_npy(path).with_context(|| format!("cannot read {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let env = Env::new().filter_or("INFOSEL_LOG", "info");
    let mut builder = Builder::from_env(env);
    let builder = builder.target(env_logger::Target::Stdout);
    builder.try_init().ok();

    let args = Args::parse();
    let utility: UtilityMode = args.utility.parse()?;

    let cov: Array2<f64> =
        read_npy(&args.cov).with_context(|| format!("cannot read {}", args.cov.display()))?;
    let locs: Array2<f64> =
        read_npy(&args.locs).with_context(|| format!("cannot read {}", args.locs.display()))?;
    let n = locs.nrows();

    let types = match &args.types {
        Some(path) => {
            let types = read_flags(path)?;
            if types.iter().any(|&t| t < 0. || t.fract() != 0.) {
                bail!("output types should be non negative integers");
            }
            types.mapv(|t| t as usize)
        }
        None => Array1::zeros(n),
    };
    let mut sampled = match &args.sampled {
        Some(path) => read_flags(path)?.mapv(|v| v != 0.),
        None => Array1::from_elem(n, false),
    };
    let candidates = CandidateSet::new(&locs, &types)?;
    info!(
        "Loaded {} candidates ({} output types)",
        candidates.len(),
        candidates.num_outputs()
    );

    let heterotopic = !args.homotopic;
    let logdet = match args.eigen_floor {
        Some(floor) => LogDetMethod::EigenValues { floor },
        None => LogDetMethod::Cholesky,
    };
    let selector = GreedySelector::params(args.num_samples)
        .utility(utility)
        .heterotopic(heterotopic)
        .colocation_tol(args.colocation_tol)
        .logdet(logdet)
        .check()
        .map(GreedySelector::new)?;
    let res = selector.select(&candidates, &mut sampled, &cov)?;

    let report = Report::new(&res, &candidates, utility, heterotopic);
    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("cannot write {}", path.display()))?;
            info!("Selection saved in {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_report() {
        let candidates =
            CandidateSet::new(&array![[0., 0.], [0., 0.], [1., 2.]], &array![0, 1, 0]).unwrap();
        let cov = Array2::from_diag(&array![1., 3., 2.]);
        let mut sampled = Array1::from_elem(3, false);
        let res = GreedySelector::params(2)
            .check()
            .map(GreedySelector::new)
            .unwrap()
            .select(&candidates, &mut sampled, &cov)
            .unwrap();
        let report = Report::new(&res, &candidates, UtilityMode::Entropy, true);
        assert_eq!(vec![1, 2], report.samples);
        assert_eq!(vec![1, 0], report.output_types);
        assert_eq!(vec![[0., 0.], [1., 2.]], report.locations);
        assert_eq!(2, report.gains.len());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"utility\":\"entropy\""));
    }

    #[test]
    fn test_degenerate_report() {
        let candidates = CandidateSet::new(&array![[0., 0.], [1., 1.]], &array![0, 0]).unwrap();
        let cov = Array2::<f64>::ones((2, 2));
        let mut sampled = Array1::from_elem(2, false);
        let res = GreedySelector::params(2)
            .check()
            .map(GreedySelector::new)
            .unwrap()
            .select(&candidates, &mut sampled, &cov)
            .unwrap();
        let report = Report::new(&res, &candidates, UtilityMode::Entropy, true);
        assert_eq!(
            vec![ReportValue(0.), ReportValue(f64::NEG_INFINITY)],
            report.utilities
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""utilities":[0.0,"-inf"]"#));
        assert!(json.contains(r#""gains":[0.0,"-inf"]"#));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "infosel", "--cov", "k.npy", "--locs", "l.npy", "-n", "3", "-u", "mi", "--homotopic",
        ])
        .unwrap();
        assert_eq!(3, args.num_samples);
        assert!(args.homotopic);
        assert_eq!(
            UtilityMode::MutualInformation,
            args.utility.parse::<UtilityMode>().unwrap()
        );
        assert!(args.types.is_none());
    }
}
