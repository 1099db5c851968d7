/// Preferred ONNX execution providers for the current platform.
///
/// `ort` falls back to CPU when a provider fails to register, so the
/// returned list is a preference, not a requirement. Pass
/// `use_acceleration = false` to force plain CPU inference.
pub fn preferred_execution_providers(
    use_acceleration: bool,
) -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    if !use_acceleration {
        return Vec::new();
    }
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Vec::new()
    }
}
