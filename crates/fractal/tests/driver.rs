use fractal::{AnimationConfig, RendererState, Resolution};

#[test]
fn parameter_stays_in_range_for_random_deltas() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_b01b);
    let resolution = Resolution::new(320, 200).unwrap();

    for _ in 0..200 {
        let config = AnimationConfig {
            max_iterations: rng.f64() * 1_000.0 + 1.0e-3,
            evolution_speed: rng.f64() * 50.0,
        }
        .validate()
        .unwrap();

        let mut state = RendererState::new(resolution);
        for _ in 0..100 {
            let delta = rng.f64() * 5.0;
            state = state.advance(delta, &config);
            let value = state.iteration();
            assert!(
                (0.0..config.max_iterations).contains(&value),
                "{value} outside [0, {})",
                config.max_iterations
            );
        }
    }
}

#[test]
fn same_deltas_give_same_parameter() {
    let config = AnimationConfig::default();
    let resolution = Resolution::new(64, 64).unwrap();
    let deltas = [0.016, 0.017, 0.0, 0.5, 0.033];

    let run = || {
        deltas
            .iter()
            .fold(RendererState::new(resolution), |state, &dt| state.advance(dt, &config))
    };
    assert_eq!(run().iteration().to_bits(), run().iteration().to_bits());
}

#[test]
fn zero_speed_freezes_the_animation() {
    let config = AnimationConfig {
        max_iterations: 100.0,
        evolution_speed: 0.0,
    };
    let resolution = Resolution::new(64, 64).unwrap();
    let state = RendererState::starting_at(12.0, resolution, &config);
    assert_eq!(state.advance(10.0, &config).iteration(), 12.0);
}
