use rand::rngs::StdRng;
use rand::SeedableRng;

// ---------------------------------------------------------------------------
// 1-D K-means (Lloyd's iteration)
// ---------------------------------------------------------------------------

/// Iteration bound for Lloyd's refinement.
const MAX_ITERATIONS: usize = 300;

/// Partition `values` into at most `k` clusters over a single feature.
///
/// Initial centroids are `k` distinct rows drawn with a seeded RNG, so the
/// same seed and input always produce the same assignments. Assignment ties
/// go to the lowest centroid index and empty clusters keep their previous
/// centroid. If there are fewer rows than `k`, `k` is clamped; fewer
/// *distinct* values than `k` can leave duplicate centroids and therefore
/// fewer occupied clusters — the partition is still valid, some ids just go
/// unused.
///
/// Returns one cluster id per input row, in input order. Ids are arbitrary
/// labels: nothing about their numeric order is meaningful.
pub fn kmeans_1d(values: &[f64], k: usize, seed: u64) -> Vec<usize> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let k = k.clamp(1, n);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids: Vec<f64> = rand::seq::index::sample(&mut rng, n, k)
        .iter()
        .map(|i| values[i])
        .collect();

    let mut assignments = vec![0usize; n];
    for iteration in 0..MAX_ITERATIONS {
        // Assignment step.
        let mut changed = false;
        for (i, &v) in values.iter().enumerate() {
            let best = nearest_centroid(&centroids, v);
            if assignments[i] != best {
                assignments[i] = best;
                changed = true;
            }
        }
        if !changed && iteration > 0 {
            break;
        }

        // Update step: each centroid moves to the mean of its members.
        let mut sums = vec![0.0; k];
        let mut members = vec![0usize; k];
        for (i, &v) in values.iter().enumerate() {
            sums[assignments[i]] += v;
            members[assignments[i]] += 1;
        }
        for (c, centroid) in centroids.iter_mut().enumerate() {
            if members[c] > 0 {
                *centroid = sums[c] / members[c] as f64;
            }
        }
    }

    assignments
}

fn nearest_centroid(centroids: &[f64], value: f64) -> usize {
    centroids
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (value - **a).abs();
            let db = (value - **b).abs();
            da.total_cmp(&db)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_gets_exactly_one_id() {
        let values = [5.0, 120.0, 7.0, 118.0, 300.0];
        let ids = kmeans_1d(&values, 3, 42);
        assert_eq!(ids.len(), values.len());
    }

    #[test]
    fn distinct_ids_bounded_by_k() {
        let values: Vec<f64> = (0..40).map(|i| i as f64 * 3.7).collect();
        let ids = kmeans_1d(&values, 3, 42);
        let mut distinct = ids.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert!(distinct.len() <= 3);
        assert!(ids.iter().all(|&id| id < 3));
    }

    #[test]
    fn same_seed_and_input_is_deterministic() {
        let values: Vec<f64> = (0..25).map(|i| ((i * 37) % 100) as f64).collect();
        let a = kmeans_1d(&values, 3, 42);
        let b = kmeans_1d(&values, 3, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn well_separated_groups_stay_together() {
        // Three obvious bands; ids are arbitrary but membership is not.
        let values = [1.0, 2.0, 3.0, 100.0, 101.0, 102.0, 1000.0, 1001.0];
        let ids = kmeans_1d(&values, 3, 42);

        assert!(ids[0] == ids[1] && ids[1] == ids[2]);
        assert!(ids[3] == ids[4] && ids[4] == ids[5]);
        assert!(ids[6] == ids[7]);
        assert_ne!(ids[0], ids[3]);
        assert_ne!(ids[3], ids[6]);
    }

    #[test]
    fn fewer_rows_than_k_does_not_panic() {
        let values = [10.0, 20.0];
        let ids = kmeans_1d(&values, 3, 42);
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|&id| id < 2));
    }

    #[test]
    fn fewer_distinct_values_than_k_does_not_panic() {
        let values = [5.0, 5.0, 5.0, 5.0];
        let ids = kmeans_1d(&values, 3, 42);
        assert_eq!(ids.len(), 4);
        // All identical values end up in one cluster.
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn empty_input_yields_empty_assignments() {
        assert!(kmeans_1d(&[], 3, 42).is_empty());
    }
}
