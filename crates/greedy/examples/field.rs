use env_logger::{Builder, Env};
use infosel_greedy::utils::NormalizedData;
use infosel_greedy::{CandidateSet, GreedySelector, UtilityMode};
use linfa::ParamGuard;
use ndarray::{array, Array1, Array2};

/// Covariance of a 3-output field: squared exponential correlation over
/// locations times an output coregionalization matrix
fn field_covariance(candidates: &CandidateSet<f64>, coreg: &Array2<f64>) -> Array2<f64> {
    let n = candidates.len();
    Array2::from_shape_fn((n, n), |(i, j)| {
        let d = &candidates.location(i) - &candidates.location(j);
        let corr = (-d.mapv(|v| v * v).sum()).exp();
        corr * coreg[[candidates.output_type(i), candidates.output_type(j)]]
            + if i == j { 1e-6 } else { 0. }
    })
}

fn main() {
    let env = Env::new().filter_or("INFOSEL_LOG", "info");
    let mut builder = Builder::from_env(env);
    let builder = builder.target(env_logger::Target::Stdout);
    builder.try_init().ok();

    // 5x5 grid of locations in km
    let grid = Array2::from_shape_fn((25, 2), |(i, j)| {
        if j == 0 {
            (i / 5) as f64 * 0.5
        } else {
            (i % 5) as f64 * 0.5
        }
    });
    let locations = NormalizedData::new(&grid)
        .and_then(|norm| norm.normalize(&grid))
        .expect("grid normalized");
    let candidates = CandidateSet::from_locations(&locations, 3).expect("candidates");
    let coreg = array![[1.0, 0.8, 0.3], [0.8, 1.0, 0.5], [0.3, 0.5, 1.0]];
    let cov = field_covariance(&candidates, &coreg);

    for utility in [UtilityMode::Entropy, UtilityMode::MutualInformation] {
        let mut sampled = Array1::from_elem(candidates.len(), false);
        let res = GreedySelector::params(6)
            .utility(utility)
            .heterotopic(true)
            .check()
            .map(GreedySelector::new)
            .expect("selector")
            .select(&candidates, &mut sampled, &cov)
            .expect("selection");
        println!("{utility}: samples = {:?}", res.indices());
        println!("  types = {}", res.output_types(&candidates));
        println!("  locations = {}", res.locations(&candidates));
        println!("  gains = {}", res.marginal_gains());
    }
}
