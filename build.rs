use std::env;

// Keys embedded into the binary as compile-time fallbacks for runtime settings.
const EMBEDDED_KEYS: &[&str] = &["PUBQUIZ_API_BASE_URL"];

fn main() {
    println!("cargo:rerun-if-changed=.env");
    for key in EMBEDDED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    // Load .env file during build so its values can be embedded
    if let Err(e) = dotenvy::dotenv() {
        println!("cargo:warning=BUILD.RS: No .env file loaded ({}). Using system environment variables.", e);
    }

    for key in EMBEDDED_KEYS {
        match env::var(key) {
            Ok(value) if !value.trim().is_empty() => {
                println!("cargo:rustc-env={}={}", key, value.trim());
                println!("cargo:warning=Embedded {} ({})", key, value.trim());
            }
            _ => {}
        }
    }
}
