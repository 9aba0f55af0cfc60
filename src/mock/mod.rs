//! ## Mock
//!
//! Contains mock for test units

pub mod fs;
#[cfg(feature = "ssh")]
pub mod sftp;
#[cfg(feature = "ssh")]
pub mod ssh;

#[cfg(feature = "with-containers")]
use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Initialize the test logger; can be called by every test
pub fn logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Generate the name of a random directory, used to isolate tests running on a real server
#[cfg(feature = "with-containers")]
pub fn generate_tempdir() -> String {
    let mut rng = thread_rng();
    let name: String = std::iter::repeat(())
        .map(|()| rng.sample(Alphanumeric))
        .map(char::from)
        .take(8)
        .collect();
    format!("temp_{}", name)
}
