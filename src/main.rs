#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
    use laila_nav::backend::BackendClient;
    use laila_nav::config::Config;
    use laila_nav::server::{router, ServerState};
    use leptos::prelude::*;
    use opentelemetry_configuration::OtelSdkBuilder;

    let config = Config::load().context("failed to load configuration")?;

    let mut otel = OtelSdkBuilder::new()
        .service_name(env!("CARGO_PKG_NAME"))
        .service_version(env!("CARGO_PKG_VERSION"))
        .resource_attribute("vcs.repository.name", env!("CARGO_PKG_NAME"))
        .resource_attribute("vcs.ref.head.revision", env!("VCS_REF_HEAD_REVISION"))
        .resource_attribute("vcs.ref.head.name", env!("VCS_REF_HEAD_NAME"))
        .resource_attribute("vcs.ref.head.type", "branch")
        .resource_attribute(
            "deployment.environment.name",
            config.otel.environment.clone(),
        );
    if let Some(endpoint) = config.otel.endpoint.clone() {
        otel = otel.endpoint(endpoint);
    }
    let _guard = otel
        .with_standard_env()
        .build()
        .map_err(|e| anyhow::anyhow!("failed to initialise OpenTelemetry: {e:?}"))?;

    let conf = get_configuration(None).context("failed to read Leptos configuration")?;
    let mut leptos_options = conf.leptos_options;
    if let Some(listen) = &config.listen {
        leptos_options.site_addr = listen
            .parse()
            .with_context(|| format!("invalid listen address {listen}"))?;
    }
    let addr = leptos_options.site_addr;

    let backend = BackendClient::new(&config.backend)?;
    tracing::info!(backend = %config.backend.url, "forwarding backend routes");

    let app = router(ServerState {
        leptos_options,
        backend,
    })
    .layer(OtelInResponseLayer)
    .layer(OtelAxumLayer::default());

    if let Some(socket_path) = &config.socket {
        tracing::info!("listening on unix socket {}", socket_path);
        let listener = tokio::net::UnixListener::bind(socket_path)
            .with_context(|| format!("failed to bind {socket_path}"))?;
        axum::serve(listener, app.into_make_service()).await?;
    } else {
        tracing::info!("listening on http://{}", &addr);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        axum::serve(listener, app.into_make_service()).await?;
    }

    Ok(())
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for the hydration entry point
}
