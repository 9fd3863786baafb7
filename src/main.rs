use actix_web::{App, HttpServer};
use tracing_subscriber::EnvFilter;

use card_validator::config::ServerConfig;
use card_validator::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let (host, port) = config.bind_addr();
    tracing::info!(host, port, "starting card validator");

    let shutdown = ShutdownSignals::install()?;

    let server = HttpServer::new(|| App::new().configure(routes::configure))
        .disable_signals()
        .bind(config.bind_addr())?
        .run();

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown.recv().await;
        tracing::info!("Received shutdown signal, shutting down...");
        handle.stop(true).await;
    });

    server.await?;
    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Process signals that stop the server, registered up front so a failed
/// registration aborts startup.
#[cfg(unix)]
struct ShutdownSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
    suspend: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    fn install() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(ShutdownSignals {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            quit: signal(SignalKind::quit())?,
            suspend: signal(SignalKind::from_raw(libc::SIGTSTP))?,
        })
    }

    async fn recv(mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => {}
            _ = self.terminate.recv() => {}
            _ = self.quit.recv() => {}
            _ = self.suspend.recv() => {}
        }
    }
}

#[cfg(windows)]
struct ShutdownSignals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl ShutdownSignals {
    fn install() -> std::io::Result<Self> {
        Ok(ShutdownSignals {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    async fn recv(mut self) {
        self.ctrl_c.recv().await;
    }
}
