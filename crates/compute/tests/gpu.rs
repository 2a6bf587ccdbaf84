// Golden-master comparison of the WGSL program against the CPU reference.
// Skipped at runtime when no adapter can be opened.

#[cfg(feature = "gpu")]
mod wgpu_tests {
    use compute::{ComputeBackend, CpuBackend, Framebuffer, WgpuBackend};
    use fractal::FrameUniforms;

    const CHANNEL_TOLERANCE: u8 = 8;

    fn gpu() -> Option<WgpuBackend> {
        match WgpuBackend::new() {
            Ok(backend) => Some(backend),
            Err(err) => {
                eprintln!("skipping gpu test: {err}");
                None
            }
        }
    }

    fn agreeing_fraction(expected: &Framebuffer, actual: &Framebuffer) -> f64 {
        let total = expected.as_bytes().len() / 4;
        let agreeing = expected
            .as_bytes()
            .chunks_exact(4)
            .zip(actual.as_bytes().chunks_exact(4))
            .filter(|(a, b)| a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= CHANNEL_TOLERANCE))
            .count();
        agreeing as f64 / total as f64
    }

    fn compare(uniforms: FrameUniforms) {
        let Some(gpu) = gpu() else { return };
        let expected = CpuBackend::new().dispatch(&uniforms).unwrap();
        let actual = gpu.dispatch(&uniforms).unwrap();

        assert_eq!(expected.width(), actual.width());
        assert_eq!(expected.height(), actual.height());
        assert!(actual.as_bytes().chunks_exact(4).all(|texel| texel[3] == 255));

        // Transcendentals differ slightly between drivers, and the fractal has
        // chaotic regions, so only most pixels are expected to agree.
        let fraction = agreeing_fraction(&expected, &actual);
        assert!(fraction > 0.9, "only {fraction:.3} of pixels agree");
    }

    #[test]
    fn matches_cpu_at_time_zero() {
        compare(FrameUniforms::new(0.0, 64.0, 48.0));
    }

    #[test]
    fn matches_cpu_mid_animation() {
        compare(FrameUniforms::new(37.5, 48.0, 48.0));
    }

    #[test]
    fn target_is_rebuilt_on_resize() {
        let Some(gpu) = gpu() else { return };
        let small = gpu.dispatch(&FrameUniforms::new(1.0, 16.0, 8.0)).unwrap();
        let large = gpu.dispatch(&FrameUniforms::new(1.0, 70.0, 30.0)).unwrap();
        assert_eq!((small.width(), small.height()), (16, 8));
        assert_eq!((large.width(), large.height()), (70, 30));
        assert_eq!(large.as_bytes().len(), 70 * 30 * 4);
    }
}
