//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pdca_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("pdca_core version={}", pdca_core::core_version());
    match pdca_core::db::open_db_in_memory() {
        Ok(_) => println!("pdca_core db=ok"),
        Err(err) => {
            eprintln!("pdca_core db=error {err}");
            std::process::exit(1);
        }
    }
}
