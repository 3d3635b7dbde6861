//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! and serves `static/` on localhost so the gallery can be opened in a
//! browser.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::process::{Command, Stdio};
    use std::{env, process};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = env::var("GALLERY_PORT").unwrap_or_else(|_| "8000".into());

    log::info!("building WASM pkg");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(st) => {
            log::error!("wasm-pack exited with {st}");
            process::exit(1);
        }
        Err(e) => {
            log::warn!("wasm-pack not runnable ({e}); serving whatever is already in static/pkg");
        }
    }

    log::info!("serving static/ at http://127.0.0.1:{port}");
    let server = Command::new("python3")
        .args(["-m", "http.server", port.as_str(), "--bind", "127.0.0.1", "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status();

    match server {
        Ok(st) if st.success() => {}
        Ok(st) => {
            log::error!("http server exited with {st}");
            process::exit(1);
        }
        Err(e) => {
            log::error!("failed to start http server: {e}");
            process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
