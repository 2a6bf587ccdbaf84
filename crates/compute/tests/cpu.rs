use compute::{create_backend, BackendKind, ComputeBackend, CpuBackend};
use fractal::{FrameUniforms, PixelProgram, Resolution};

#[test]
fn framebuffer_matches_the_pixel_program() {
    let uniforms = FrameUniforms::new(2.5, 20.0, 16.0);
    let frame = CpuBackend::new().dispatch(&uniforms).unwrap();
    let program = PixelProgram::new(2.5, Resolution::new(20, 16).unwrap());

    for (column, row) in [(0, 0), (10, 8), (9, 7), (19, 15), (4, 12)] {
        let expected = compute::to_rgba8(program.shade_texel(column, row));
        assert_eq!(frame.pixel(column, row), Some(expected), "texel {column},{row}");
    }
}

#[test]
fn coverage_is_a_fraction() {
    let backend = create_backend(BackendKind::Cpu).unwrap();
    let frame = backend.dispatch(&FrameUniforms::new(0.0, 16.0, 12.0)).unwrap();
    let coverage = frame.coverage();
    assert!(coverage > 0.0 && coverage < 1.0, "coverage {coverage}");
}
