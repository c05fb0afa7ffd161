use xtts::Device;

#[test]
fn detect_is_consistent_with_use_cuda() {
    let device = Device::detect();
    assert_eq!(device.use_cuda(), matches!(device, Device::Cuda));
}

#[test]
fn display_matches_engine_flags() {
    assert_eq!(Device::Cuda.to_string(), "cuda");
    assert_eq!(Device::Cpu.to_string(), "cpu");
}
