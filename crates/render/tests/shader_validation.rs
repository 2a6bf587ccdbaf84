use fractal::{FrameUniforms, SHADER_SOURCE};

fn parse_and_validate() -> naga::Module {
    let module = match naga::front::wgsl::parse_str(SHADER_SOURCE) {
        Ok(m) => m,
        Err(e) => panic!(
            "WGSL parsing error:\n{error_report}",
            error_report = e.emit_to_string(SHADER_SOURCE)
        ),
    };

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    if let Err(e) = validator.validate(&module) {
        panic!(
            "WGSL validation error:\n{error_report}",
            error_report = e.emit_to_string(SHADER_SOURCE)
        );
    }
    module
}

#[test]
fn mandelbulb_shader_validates() {
    parse_and_validate();
}

#[test]
fn exposes_vertex_and_fragment_entry_points() {
    let module = parse_and_validate();
    let stage_of = |name: &str| {
        module
            .entry_points
            .iter()
            .find(|ep| ep.name == name)
            .map(|ep| ep.stage)
    };
    assert_eq!(stage_of("vs_main"), Some(naga::ShaderStage::Vertex));
    assert_eq!(stage_of("fs_main"), Some(naga::ShaderStage::Fragment));
}

#[test]
fn uniform_block_matches_host_layout() {
    let module = parse_and_validate();
    let (_, frame) = module
        .global_variables
        .iter()
        .find(|(_, var)| var.space == naga::AddressSpace::Uniform)
        .expect("shader declares a uniform block");

    let binding = frame.binding.as_ref().expect("uniform is bound");
    assert_eq!((binding.group, binding.binding), (0, 0));

    let size = module.types[frame.ty].inner.size(module.to_ctx());
    assert_eq!(size as usize, std::mem::size_of::<FrameUniforms>());
}
