//! Run orchestration: one prompt in, an ordered artifact list out.
//!
//! A run walks an explicit state machine
//! `Idle -> Validating -> Generating(i) -> [Assembling] -> Done | Failed`
//! and stops on the first hard failure. Inference calls are strictly
//! sequential; their order fixes both the image numbering and the
//! slideshow frame order.

use crate::error::RunError;
use crate::inference::TextToImageProvider;
use crate::slideshow::SlideshowAssembler;
use crate::types::{Artifact, GeneratedImage, Job};

use super::store::ArtifactStore;
use super::variants;

/// The stages a run moves through. Terminal states are final; a run
/// instance is consumed by [`GenerationRun::run`] and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Validating,
    Generating { index: usize },
    Assembling,
    Done,
    Failed,
}

/// Tagged result of a run.
///
/// `Failed` carries the artifacts persisted before the stop: if the k-th
/// inference call fails, exactly k images exist and no video is produced.
#[derive(Debug)]
pub enum RunOutcome {
    Done { artifacts: Vec<Artifact> },
    Failed { error: RunError, artifacts: Vec<Artifact> },
}

impl RunOutcome {
    /// The artifacts produced, regardless of outcome.
    pub fn artifacts(&self) -> &[Artifact] {
        match self {
            Self::Done { artifacts } | Self::Failed { artifacts, .. } => artifacts,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}

/// Drives one generation job through variant expansion, sequential
/// inference, persistence, and optional slideshow assembly.
pub struct GenerationRun {
    provider: Box<dyn TextToImageProvider>,
    store: ArtifactStore,
    assembler: SlideshowAssembler,
    state: RunState,
}

impl GenerationRun {
    /// Assemble a fresh run. One instance per submission.
    pub fn new(
        provider: Box<dyn TextToImageProvider>,
        store: ArtifactStore,
        assembler: SlideshowAssembler,
    ) -> Self {
        Self {
            provider,
            store,
            assembler,
            state: RunState::Idle,
        }
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!("run state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail(mut self, error: RunError, artifacts: Vec<Artifact>) -> RunOutcome {
        self.transition(RunState::Failed);
        if error.is_warning() {
            tracing::warn!("run failed: {error}");
        } else {
            tracing::error!("run failed: {error}");
        }
        RunOutcome::Failed { error, artifacts }
    }

    /// Execute the job to completion, consuming the run.
    pub async fn run(mut self, job: &Job) -> RunOutcome {
        self.transition(RunState::Validating);
        if job.base_prompt.is_empty() {
            return self.fail(RunError::InvalidPrompt, Vec::new());
        }

        let prompts = variants::generate(&job.base_prompt, job.count);
        let mut images: Vec<GeneratedImage> = Vec::with_capacity(job.count);
        let mut artifacts: Vec<Artifact> = Vec::new();

        for (index, variant) in prompts.into_iter().enumerate() {
            self.transition(RunState::Generating { index });
            tracing::info!(
                "Generating image {}/{} via {} ({})",
                index + 1,
                job.count,
                self.provider.name(),
                variant.label
            );

            let image = match self.provider.generate(&variant.text).await {
                Ok(image) => image,
                Err(e) => return self.fail(e.into(), artifacts),
            };

            let path = match self.store.save(&job.base_prompt, index, &image) {
                Ok(path) => path,
                Err(e) => return self.fail(e.into(), artifacts),
            };

            artifacts.push(Artifact::image(path));
            images.push(GeneratedImage {
                image,
                variant,
                index,
            });
        }

        // Assemble only after a fully successful generation pass with more
        // than one image; a single image never yields a video.
        if images.len() > 1 && self.assembler.is_enabled() {
            self.transition(RunState::Assembling);
            let output = self.store.video_path(&job.base_prompt);
            match self.assembler.assemble(&images, &output).await {
                Ok(path) => artifacts.push(Artifact::video(path)),
                Err(e) => return self.fail(e.into(), artifacts),
            }
        }

        self.transition(RunState::Done);
        tracing::info!("run complete: {} artifacts", artifacts.len());
        RunOutcome::Done { artifacts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlideshowConfig;
    use crate::error::InferenceError;
    use crate::types::ArtifactKind;
    use async_trait::async_trait;
    use image::DynamicImage;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every prompt it sees; fails the call at `fail_at` if set.
    struct MockProvider {
        prompts: Mutex<Vec<String>>,
        fail_at: Option<usize>,
    }

    impl MockProvider {
        fn ok() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_at: None,
            }
        }

        fn failing_at(index: usize) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_at: Some(index),
            }
        }
    }

    #[async_trait]
    impl TextToImageProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(&self, prompt: &str) -> Result<DynamicImage, InferenceError> {
            let mut prompts = self.prompts.lock().unwrap();
            let index = prompts.len();
            prompts.push(prompt.to_string());
            if Some(index) == self.fail_at {
                return Err(InferenceError::Server {
                    status: 503,
                    message: "Model is loading".to_string(),
                });
            }
            Ok(DynamicImage::new_rgb8(8, 8))
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(30)
        }
    }

    fn no_video_config() -> SlideshowConfig {
        SlideshowConfig {
            enabled: false,
            ..SlideshowConfig::default()
        }
    }

    fn run_with(
        provider: MockProvider,
        dir: &std::path::Path,
        slideshow: SlideshowConfig,
    ) -> GenerationRun {
        GenerationRun::new(
            Box::new(provider),
            ArtifactStore::new(dir).unwrap(),
            SlideshowAssembler::new(slideshow),
        )
    }

    #[tokio::test]
    async fn test_whitespace_prompt_fails_with_zero_calls() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockProvider::ok();
        let run = run_with(provider, dir.path(), no_video_config());

        let outcome = run.run(&Job::new("   ", 3)).await;
        match outcome {
            RunOutcome::Failed { error, artifacts } => {
                assert!(matches!(error, RunError::InvalidPrompt));
                assert!(artifacts.is_empty());
            }
            RunOutcome::Done { .. } => panic!("Expected Failed"),
        }
        // Zero inference calls were made; the directory holds nothing
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_early_stop_keeps_exactly_k_images() {
        let dir = tempfile::tempdir().unwrap();
        let run = run_with(MockProvider::failing_at(2), dir.path(), no_video_config());

        let outcome = run.run(&Job::new("a red fox", 5)).await;
        match &outcome {
            RunOutcome::Failed { error, artifacts } => {
                assert!(matches!(
                    error,
                    RunError::Inference(InferenceError::Server { status: 503, .. })
                ));
                // Calls 0 and 1 succeeded, call 2 failed, calls 3.. never ran
                assert_eq!(artifacts.len(), 2);
                assert!(artifacts.iter().all(|a| a.kind == ArtifactKind::Image));
                assert!(artifacts.iter().all(|a| a.path.exists()));
            }
            RunOutcome::Done { .. } => panic!("Expected Failed"),
        }
        assert!(!outcome.is_done());
    }

    #[tokio::test]
    async fn test_single_image_run_produces_no_video() {
        let dir = tempfile::tempdir().unwrap();
        // Slideshow stays enabled; the one-image rule alone must skip it
        let run = run_with(MockProvider::ok(), dir.path(), SlideshowConfig::default());

        let outcome = run.run(&Job::new("a red fox", 1)).await;
        match outcome {
            RunOutcome::Done { artifacts } => {
                assert_eq!(artifacts.len(), 1);
                assert_eq!(artifacts[0].kind, ArtifactKind::Image);
            }
            RunOutcome::Failed { error, .. } => panic!("Expected Done, got {error}"),
        }
    }

    #[tokio::test]
    async fn test_full_run_names_and_artifact_order() {
        let dir = tempfile::tempdir().unwrap();
        let run = run_with(MockProvider::ok(), dir.path(), no_video_config());

        let outcome = run.run(&Job::new("a red fox", 3)).await;
        let artifacts = outcome.artifacts();
        assert!(outcome.is_done());
        assert_eq!(artifacts.len(), 3);

        let hash = ArtifactStore::prompt_hash("a red fox");
        for (i, artifact) in artifacts.iter().enumerate() {
            let name = artifact.path.file_name().unwrap().to_str().unwrap();
            assert_eq!(name, format!("image_{hash}_{}.png", i + 1));
            assert!(artifact.path.exists());
        }
    }

    #[tokio::test]
    async fn test_prompts_sent_in_variant_order() {
        use std::sync::Arc;

        // The run consumes its provider box, so share the mock via Arc to
        // inspect the recorded prompts afterwards.
        struct SharedProvider(Arc<MockProvider>);

        #[async_trait]
        impl TextToImageProvider for SharedProvider {
            fn name(&self) -> &str {
                self.0.name()
            }
            async fn generate(&self, prompt: &str) -> Result<DynamicImage, InferenceError> {
                self.0.generate(prompt).await
            }
            fn timeout(&self) -> Duration {
                self.0.timeout()
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let shared = Arc::new(MockProvider::ok());
        let run = GenerationRun::new(
            Box::new(SharedProvider(shared.clone())),
            ArtifactStore::new(dir.path()).unwrap(),
            SlideshowAssembler::new(no_video_config()),
        );

        let outcome = run.run(&Job::new("a red fox", 3)).await;
        assert!(outcome.is_done());

        let prompts = shared.prompts.lock().unwrap();
        assert_eq!(
            *prompts,
            vec![
                "a red fox, different lighting",
                "a red fox, alternate angle",
                "a red fox, artistic style",
            ]
        );
    }
}
