use anyhow::Result;

/// Inicializa el logging global del motor.
///
/// Respeta `RUST_LOG` si está definido y añade las directivas por defecto
/// del crate. Llamarlo más de una vez devuelve error del subscriber, así
/// que los tests lo envuelven en `try_init`-style guards.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("open_player=debug".parse()?),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("No se pudo inicializar el logging: {e}"))?;

    Ok(())
}
