//! Independent runs side by side.
//!
//! Each scenario becomes its own `Simulation` with its own `Building`, so
//! runs share nothing and may execute on any thread.  Parallelism is only
//! ever across runs, never inside a tick.

/// Run `run(index, scenario)` for every scenario and collect the results in
/// scenario order.
///
/// With the `parallel` feature the scenarios run on Rayon's thread pool;
/// without it they run one after another on the calling thread.
pub fn run_isolated<S, T, F>(scenarios: Vec<S>, run: F) -> Vec<T>
where
    S: Send,
    T: Send,
    F: Fn(usize, S) -> T + Send + Sync,
{
    #[cfg(not(feature = "parallel"))]
    {
        scenarios
            .into_iter()
            .enumerate()
            .map(|(i, s)| run(i, s))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        scenarios
            .into_par_iter()
            .enumerate()
            .map(|(i, s)| run(i, s))
            .collect()
    }
}
