//! # Image Builder
//!
//! Builds the per-port container image through a [`BackendOperations`]
//! backend and resolves the resulting image reference. The backend emits
//! its progress and success markers on the error stream, so that is the
//! stream handed to [`crate::identify`] after a zero exit.

use log::{debug, info};

use crate::backend::BackendOperations;
use crate::error::{Error, Result};
use crate::identify;

/// Thin orchestration over a build backend: invoke, check, identify.
pub struct ImageBuilder<'a> {
    backend: &'a dyn BackendOperations,
}

impl<'a> ImageBuilder<'a> {
    /// An image builder driving the given backend.
    pub fn new(backend: &'a dyn BackendOperations) -> Self {
        Self { backend }
    }

    /// Build the image for `port` and return its reference.
    ///
    /// `target` defaults to the port name when unset; `tag` is an optional
    /// human-assigned name passed through to the backend. Fails with
    /// [`Error::BuildBackendFailed`] carrying the captured error stream on
    /// non-zero exit; otherwise the reference is extracted from that same
    /// stream.
    pub fn build(
        &self,
        port: &str,
        target: Option<&str>,
        tag: Option<&str>,
    ) -> Result<String> {
        let target = target.unwrap_or(port);
        info!("Building image for port {} (target {})", port, target);

        let output = self.backend.build_image(tag, target)?;
        if !output.success {
            return Err(Error::BuildBackendFailed {
                target: target.to_string(),
                stderr: output.stderr,
            });
        }

        let reference = identify::extract_image_reference(&output.stderr)?;
        debug!("Resolved image reference {}", reference);
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendOutput, Mount};
    use std::sync::Mutex;

    /// Records build invocations and replays a canned backend result.
    struct StubBackend {
        result: BackendOutput,
        calls: Mutex<Vec<(Option<String>, String)>>,
    }

    impl StubBackend {
        fn succeeding(stderr: &str) -> Self {
            Self {
                result: BackendOutput {
                    success: true,
                    code: Some(0),
                    stdout: String::new(),
                    stderr: stderr.to_string(),
                },
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(stderr: &str) -> Self {
            Self {
                result: BackendOutput {
                    success: false,
                    code: Some(1),
                    stdout: String::new(),
                    stderr: stderr.to_string(),
                },
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl BackendOperations for StubBackend {
        fn build_image(&self, tag: Option<&str>, target: &str) -> Result<BackendOutput> {
            self.calls
                .lock()
                .unwrap()
                .push((tag.map(str::to_string), target.to_string()));
            Ok(self.result.clone())
        }

        fn run_container(
            &self,
            _image: &str,
            _mounts: &[Mount],
            _env: &[(String, String)],
        ) -> Result<Option<i32>> {
            unreachable!("image builder never runs containers")
        }
    }

    const DIGEST: &str = "0000000000000000000000000000000000000000000000000000000000000000";

    #[test]
    fn test_build_extracts_reference_from_stderr() {
        let backend =
            StubBackend::succeeding(&format!("#14 writing image sha256:{} done\n", DIGEST));
        let builder = ImageBuilder::new(&backend);

        let reference = builder.build("rp2", Some("rp2build"), None).unwrap();
        assert_eq!(reference, format!("sha256:{}", DIGEST));
    }

    #[test]
    fn test_build_target_defaults_to_port() {
        let backend = StubBackend::succeeding("Successfully built abc123\n");
        let builder = ImageBuilder::new(&backend);

        builder.build("unix", None, None).unwrap();
        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(None, "unix".to_string())]);
    }

    #[test]
    fn test_build_passes_tag_through() {
        let backend = StubBackend::succeeding("Successfully built abc123\n");
        let builder = ImageBuilder::new(&backend);

        builder.build("rp2", None, Some("fw:rp2")).unwrap();
        let calls = backend.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[(Some("fw:rp2".to_string()), "rp2".to_string())]
        );
    }

    #[test]
    fn test_build_failure_carries_stderr() {
        let backend = StubBackend::failing("ERROR: failed to solve: no such target\n");
        let builder = ImageBuilder::new(&backend);

        let err = builder.build("rp2", None, None).unwrap_err();
        match err {
            Error::BuildBackendFailed { target, stderr } => {
                assert_eq!(target, "rp2");
                assert!(stderr.contains("no such target"));
            }
            other => panic!("Expected BuildBackendFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_build_success_without_marker() {
        let backend = StubBackend::succeeding("lots of progress output\nbut no marker\n");
        let builder = ImageBuilder::new(&backend);

        let err = builder.build("rp2", None, None).unwrap_err();
        assert!(matches!(err, Error::ImageIdNotFound { .. }));
    }
}
