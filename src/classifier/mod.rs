//! Disease classifier
//!
//! Loads the serialized tomato model once and runs one forward pass per
//! image: decode, resize to the fixed input resolution, normalize to
//! [0, 1], arg-max over the 3-class output vector.

mod types;

pub use types::{ClassLabel, Prediction};

use crate::error::{Result, TomatoDoctorError};
use image::{imageops::FilterType, DynamicImage};
use std::path::Path;
use tract_onnx::prelude::*;

/// Fixed square input resolution of the model.
pub const INPUT_SIZE: u32 = 256;

type RunnableOnnx = TypedRunnableModel<TypedModel>;

#[derive(Debug)]
pub struct DiseaseClassifier {
    model: RunnableOnnx,
}

impl DiseaseClassifier {
    /// Load the model artifact. Called once per process by the composition
    /// root; the classifier is reused for all subsequent calls.
    ///
    /// Two-step load: the strict path pins the input shape and runs the
    /// optimizer. If that fails with a recognized shape-metadata mismatch,
    /// retry with a compatibility path that skips the optimizer's shape
    /// validation. Any other failure is fatal.
    pub fn load(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            return Err(TomatoDoctorError::ModelUnavailable(format!(
                "model file not found: {}",
                model_path.display()
            )));
        }

        let model = match Self::load_strict(model_path) {
            Ok(model) => model,
            Err(err) if is_shape_mismatch(&err) => {
                Self::load_compat(model_path).map_err(|e| {
                    TomatoDoctorError::ModelUnavailable(format!(
                        "compatibility load failed: {e}"
                    ))
                })?
            }
            Err(err) => {
                return Err(TomatoDoctorError::ModelUnavailable(err.to_string()));
            }
        };

        Ok(Self { model })
    }

    fn input_fact() -> InferenceFact {
        InferenceFact::dt_shape(
            f32::datum_type(),
            tvec!(1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3),
        )
    }

    fn load_strict(model_path: &Path) -> TractResult<RunnableOnnx> {
        tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(0, Self::input_fact())?
            .into_optimized()?
            .into_runnable()
    }

    /// Compatibility path: re-declares the fixed input fact but skips the
    /// optimizer pass whose shape unification rejected the artifact.
    fn load_compat(model_path: &Path) -> TractResult<RunnableOnnx> {
        tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(0, Self::input_fact())?
            .into_typed()?
            .into_runnable()
    }

    /// Classify a leaf image on disk.
    pub fn classify(&self, image_path: &Path) -> Result<Prediction> {
        let img = image::open(image_path).map_err(|e| {
            TomatoDoctorError::InvalidImage(format!("{}: {e}", image_path.display()))
        })?;
        self.classify_image(&img)
    }

    /// Classify a leaf image already held in memory.
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<Prediction> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| TomatoDoctorError::InvalidImage(e.to_string()))?;
        self.classify_image(&img)
    }

    fn classify_image(&self, img: &DynamicImage) -> Result<Prediction> {
        let resized = img
            .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
            .to_rgb8();

        // NHWC f32, pixel values scaled to [0, 1]
        let input = tract_ndarray::Array4::<f32>::from_shape_fn(
            (1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3),
            |(_, y, x, c)| resized.get_pixel(x as u32, y as u32)[c] as f32 / 255.0,
        );
        let tensor: Tensor = input.into();

        let outputs = self
            .model
            .run(tvec!(tensor.into()))
            .map_err(|e| TomatoDoctorError::ModelUnavailable(format!("inference failed: {e}")))?;

        let scores = outputs[0].to_array_view::<f32>().map_err(|e| {
            TomatoDoctorError::ModelUnavailable(format!("unexpected model output: {e}"))
        })?;

        let (best_index, best_score) = scores
            .iter()
            .copied()
            .enumerate()
            .fold((0usize, f32::MIN), |best, (i, v)| {
                if v > best.1 {
                    (i, v)
                } else {
                    best
                }
            });

        let label = ClassLabel::from_index(best_index).ok_or_else(|| {
            TomatoDoctorError::ModelUnavailable(format!(
                "model produced class index {best_index}, expected 0..{}",
                ClassLabel::ALL.len()
            ))
        })?;

        Ok(Prediction {
            label,
            confidence: best_score,
        })
    }
}

/// Message signatures of tract's shape-unification failures. Only these
/// trigger the compatibility load path.
const SHAPE_MISMATCH_SIGNATURES: &[&str] = &["to unify", "shape mismatch"];

/// Recognize the known serialized-shape incompatibility by inspecting the
/// error chain for the unification signature, rather than sniffing error
/// types.
fn is_shape_mismatch(err: &TractError) -> bool {
    err.chain().any(|cause| {
        let msg = cause.to_string().to_lowercase();
        SHAPE_MISMATCH_SIGNATURES.iter().any(|sig| msg.contains(sig))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unification_failure_takes_compat_path() {
        let err = TractError::msg(
            "Impossible to unify 1,256,256,3,F32 with 1,224,224,3,F32.",
        );
        assert!(is_shape_mismatch(&err));

        let err = TractError::msg("Shape mismatch at input 0");
        assert!(is_shape_mismatch(&err));
    }

    #[test]
    fn test_other_load_failures_stay_fatal() {
        let err = TractError::msg("unexpected end of file");
        assert!(!is_shape_mismatch(&err));

        // mentioning "shape" alone is not the recognized signature
        let err = TractError::msg("undefined shape for model input");
        assert!(!is_shape_mismatch(&err));
    }
}
