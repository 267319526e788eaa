use proptest::prelude::*;
use proptest::strategy::Strategy;
use sa_tour::random::create_rng;
use sa_tour::tour::{cost, generate_random_tour, is_valid, perturb, DEFAULT_MAX_ATTEMPTS};
use sa_tour::{acceptance_probability, Graph, SaConfig, SaRunner, Tour, TourError, TourProblem};

const NUM_NODES_STRATEGY: std::ops::Range<usize> = 3usize..8;

/// A ring `0 - 1 - ... - 0` (so a Hamiltonian cycle always exists) plus random chords.
fn graph_strategy() -> impl Strategy<Value = Graph> {
    NUM_NODES_STRATEGY.prop_flat_map(|n| {
        let weights = prop::collection::vec(1u32..100, n * n);
        let chords = prop::collection::vec(any::<bool>(), n * n);
        (Just(n), weights, chords).prop_map(|(n, weights, chords)| {
            let mut edges = Vec::new();
            for a in 0..n {
                for b in (a + 1)..n {
                    let on_ring = b == a + 1 || (a == 0 && b == n - 1);
                    if on_ring || chords[a * n + b] {
                        edges.push((a, b, f64::from(weights[a * n + b])));
                    }
                }
            }
            let labels: Vec<String> = (0..n).map(|i| format!("loc{i}")).collect();
            Graph::from_edges(labels, &edges).expect("generated graph is valid")
        })
    })
}

fn graph_and_start() -> impl Strategy<Value = (Graph, usize, u64)> {
    graph_strategy().prop_flat_map(|g| {
        let n = g.node_count();
        (Just(g), 0..n, any::<u64>())
    })
}

fn assert_closed_permutation(tour: &Tour, n: usize) -> Result<(), TestCaseError> {
    let path = tour.path();
    prop_assert_eq!(path.len(), n + 1);
    prop_assert_eq!(path[0], path[n]);
    let mut seen: Vec<usize> = path[..n].to_vec();
    seen.sort_unstable();
    prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());
    Ok(())
}

proptest! {
    /// Property: generated tours are valid, closed, anchored permutations
    #[test]
    fn generated_tours_valid((g, start, seed) in graph_and_start()) {
        let mut rng = create_rng(seed);
        let tour = generate_random_tour(&g, start, &mut rng, 1_000_000).unwrap();
        prop_assert!(is_valid(tour.path(), &g));
        prop_assert_eq!(tour.start(), start);
        assert_closed_permutation(&tour, g.node_count())?;
    }

    /// Property: a successful perturbation is one transposition of non-start nodes
    #[test]
    fn perturbation_is_single_transposition((g, start, seed) in graph_and_start()) {
        let mut rng = create_rng(seed);
        let tour = generate_random_tour(&g, start, &mut rng, 1_000_000).unwrap();

        match perturb(&tour, &g, start, &mut rng, DEFAULT_MAX_ATTEMPTS) {
            Ok(next) => {
                prop_assert!(next.is_valid(&g));
                assert_closed_permutation(&next, g.node_count())?;

                let changed: Vec<usize> = (0..tour.path().len())
                    .filter(|&i| tour.path()[i] != next.path()[i])
                    .collect();
                prop_assert_eq!(changed.len(), 2);
                let (i, j) = (changed[0], changed[1]);
                prop_assert_eq!(tour.path()[i], next.path()[j]);
                prop_assert_eq!(tour.path()[j], next.path()[i]);
                prop_assert!(tour.path()[i] != start && tour.path()[j] != start);
            }
            Err(err) => {
                prop_assert!(!tour.has_valid_neighbor(&g));
                prop_assert_eq!(err, TourError::NoValidTourFound { attempts: DEFAULT_MAX_ATTEMPTS });
            }
        }
    }

    /// Property: cost is a pure sum of edge weights
    #[test]
    fn cost_is_deterministic((g, start, seed) in graph_and_start()) {
        let mut rng = create_rng(seed);
        let tour = generate_random_tour(&g, start, &mut rng, 1_000_000).unwrap();
        let expected: f64 = tour.path().windows(2).map(|w| g.weight(w[0], w[1])).sum();
        prop_assert_eq!(cost(tour.path(), &g), expected);
        prop_assert_eq!(tour.cost(&g), tour.cost(&g));
        prop_assert!(tour.cost(&g) > 0.0);
    }

    /// Property: the best-seen cost never exceeds the seed's cost
    #[test]
    fn best_never_worse_than_seed((g, start, seed) in graph_and_start()) {
        let mut rng = create_rng(seed);
        let initial = generate_random_tour(&g, start, &mut rng, 1_000_000).unwrap();
        let initial_cost = initial.cost(&g);

        let problem = TourProblem::new(&g, start).unwrap();
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_stop_temperature(0.1)
            .with_decay_factor(0.9)
            .with_iterations_per_temperature(20)
            .with_seed(seed);
        let result = SaRunner::run_from(&problem, initial, &config).unwrap();

        prop_assert!(result.best_cost <= initial_cost);
        prop_assert!(result.best_cost <= result.current_cost);
        prop_assert!(result.best.is_valid(&g));
        prop_assert!(result.current.is_valid(&g));
        prop_assert_eq!(result.best_cost, result.best.cost(&g));
    }

    /// Property: acceptance of a worse move shrinks with temperature and stays in [0, 1]
    #[test]
    fn acceptance_shrinks_with_temperature(delta in -100.0f64..-0.01, t in 0.01f64..100.0) {
        let hot = acceptance_probability(delta, t * 2.0);
        let cold = acceptance_probability(delta, t);
        prop_assert!((0.0..=1.0).contains(&hot));
        prop_assert!((0.0..=1.0).contains(&cold));
        prop_assert!(cold <= hot);
        prop_assert_eq!(acceptance_probability(-delta, t), 1.0);
    }
}

#[test]
fn reference_tour_and_swap() {
    let g = Graph::from_edges(
        ["Snell's Farm", "Planter's Farm", "School", "Gym", "Movies"],
        &[
            (0, 1, 20.0),
            (0, 4, 7.0),
            (1, 2, 14.0),
            (1, 3, 8.0),
            (1, 4, 12.0),
            (2, 3, 10.0),
            (2, 4, 10.0),
            (3, 4, 15.0),
        ],
    )
    .unwrap();

    let tour = Tour::new(vec![0, 1, 2, 3, 4, 0], &g).unwrap();
    assert_eq!(tour.cost(&g), 66.0);

    let swapped = Tour::new(tour.swap_nodes(2, 3), &g).unwrap();
    assert_eq!(swapped.path(), &[0, 1, 3, 2, 4, 0]);
    assert_eq!(swapped.cost(&g), 55.0);

    let config = SaConfig::default()
        .with_initial_temperature(1.0)
        .with_decay_factor(0.999)
        .with_iterations_per_temperature(10)
        .with_stop_temperature(0.0001)
        .with_seed(2019);
    let problem = TourProblem::new(&g, 0).unwrap();
    let result = SaRunner::run_from(&problem, tour, &config).unwrap();
    assert!(result.best_cost <= 66.0);
}

#[test]
fn single_cycle_graph_always_yields_that_cycle() {
    // 0 - 2 - 4 - 1 - 3 - 0 is the only Hamiltonian cycle.
    let g = Graph::from_edges(
        ["a", "b", "c", "d", "e"],
        &[(0, 2, 1.0), (2, 4, 2.0), (4, 1, 3.0), (1, 3, 4.0), (3, 0, 5.0), (2, 3, 9.0)],
    )
    .unwrap();
    let forward = [0, 2, 4, 1, 3, 0];
    let backward = [0, 3, 1, 4, 2, 0];

    let mut rng = create_rng(99);
    for _ in 0..50 {
        let tour = generate_random_tour(&g, 0, &mut rng, 100_000).unwrap();
        assert!(tour.path() == forward || tour.path() == backward);
        assert_eq!(tour.cost(&g), 15.0);
    }
}
