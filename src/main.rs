use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::net::TcpListener;

pub mod ai;
pub mod classifier;
pub mod models;
pub mod routes;

use ai::{GroqBackend, ResponseGenerator, UPSTREAM_DEADLINE};
use routes::AppState;

const BANNER: &str = r#"
\x1b[36m
██╗    ██╗ ██████╗ ███████╗ █████╗      █████╗ ██╗
██║    ██║██╔═══██╗██╔════╝██╔══██╗    ██╔══██╗██║
██║ █╗ ██║██║   ██║█████╗  ███████║    ███████║██║
██║███╗██║██║   ██║██╔══╝  ██╔══██║    ██╔══██║██║
╚███╔███╔╝╚██████╔╝██║     ██║  ██║    ██║  ██║██║
 ╚══╝╚══╝  ╚═════╝ ╚═╝     ╚═╝  ╚═╝    ╚═╝  ╚═╝╚═╝

            [AI Tutoring Gateway v1.0]
\x1b[0m"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    print!("\x1b[2J\x1b[1;1H");
    println!("{}", BANNER);
    println!("\x1b[1;30m━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\x1b[0m");
    println!(" 🔧 \x1b[1mSYSTEM CHECK\x1b[0m");

    let backend = match GroqBackend::from_env() {
        Ok(backend) => {
            println!("    ├─ 🧠 Groq AI      : \x1b[32m✅ READY\x1b[0m");
            backend
        }
        Err(e) => {
            println!("    ├─ 🧠 Groq AI      : \x1b[31m❌ MISSING\x1b[0m");
            eprintln!("       └─ Error: {}", e);
            return Err(e.into());
        }
    };

    let generator = Arc::new(ResponseGenerator::new(Arc::new(backend), UPSTREAM_DEADLINE));

    let state = AppState {
        generator,
        started_at: Instant::now(),
    };

    let app = routes::router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    println!("\x1b[1;30m━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\x1b[0m");
    println!(" 🚀 \x1b[1;32mWOFA AI GATEWAY IS ONLINE!\x1b[0m");
    println!("    📡 Listening on   : \x1b[36mhttp://0.0.0.0:{}\x1b[0m", port);
    println!("    💬 Chat endpoint  : \x1b[36mhttp://localhost:{}/api/chat\x1b[0m", port);
    println!("\x1b[1;30m━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\x1b[0m");
    println!("\nWaiting for incoming requests...\n");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    axum::serve(listener, app)
        .await
        .context("server stopped unexpectedly")?;

    Ok(())
}
