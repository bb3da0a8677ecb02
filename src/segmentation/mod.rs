mod mask;

pub use mask::apply_confidence_mask;

use std::sync::Arc;

use image::RgbaImage;

pub type SegmentationResult<T> = Result<T, SegmentationError>;

#[derive(Debug, thiserror::Error)]
pub enum SegmentationError {
    #[error("{provider} failed: {source}")]
    Provider {
        provider: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("{provider} returned an empty foreground")]
    EmptyForeground { provider: &'static str },
}

/// Opaque subject-segmentation capability: given an image, hand back a
/// foreground-only image or fail. Implementations wrap whatever inference
/// backend the application ships; the engine only sees this contract.
pub trait SubjectSegmenter: Send + Sync {
    fn name(&self) -> &'static str;

    fn remove_background(&self, image: &RgbaImage) -> SegmentationResult<RgbaImage>;
}

/// Ordered fallback chain over segmentation providers.
///
/// Each provider is tried in turn; failures and empty foregrounds are logged
/// and the next provider runs. When every provider fails the original image
/// is returned unchanged, so automatic removal can never corrupt the buffer
/// or surface an error to the caller.
#[derive(Clone, Default)]
pub struct SegmenterChain {
    providers: Vec<Arc<dyn SubjectSegmenter>>,
}

impl SegmenterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: Arc<dyn SubjectSegmenter>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn push(&mut self, provider: Arc<dyn SubjectSegmenter>) {
        self.providers.push(provider);
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn remove_background(&self, image: &RgbaImage) -> RgbaImage {
        for provider in &self.providers {
            match provider.remove_background(image) {
                Ok(foreground) => {
                    if foreground.width() == 0 || foreground.height() == 0 {
                        tracing::warn!(
                            provider = provider.name(),
                            "provider returned an empty foreground; trying next"
                        );
                        continue;
                    }
                    tracing::debug!(provider = provider.name(), "background removed");
                    return foreground;
                }
                Err(err) => {
                    tracing::warn!(
                        provider = provider.name(),
                        %err,
                        "segmentation provider failed; trying next"
                    );
                }
            }
        }

        tracing::warn!("all segmentation providers failed; keeping the original image");
        image.clone()
    }
}

impl std::fmt::Debug for SegmenterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmenterChain")
            .field(
                "providers",
                &self
                    .providers
                    .iter()
                    .map(|provider| provider.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
