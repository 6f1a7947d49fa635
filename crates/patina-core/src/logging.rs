pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter("debug,patina_animation=trace,patina_shadow=trace")
        .init();
}
