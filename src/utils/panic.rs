use tracing::error;

/// Logs every panic with its location and exits the process with status 1.
///
/// A panic inside a coroutine aborts the whole run, the same as an error returned from it.
pub fn set_panic_hook(process_name: String) {
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|payload| payload.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();

        error!(process = %process_name, %location, "panic: {message}");
        std::process::exit(1);
    }));
}
