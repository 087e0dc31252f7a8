use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::model::{ClassOrder, ProbabilityPair, Sentiment, SentimentModel};
use super::utils::sigmoid;

/// Platt scaling fitted on held-out decision values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlattCalibration {
    pub a: f64,
    pub b: f64,
}

impl PlattCalibration {
    /// Probability of the second declared class for decision value `f`.
    pub fn probability(&self, f: f64) -> f64 {
        sigmoid(-(self.a * f + self.b))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvmParams {
    pub classes: Vec<Sentiment>,
    pub coef: Vec<f64>,
    pub intercept: f64,
    pub calibration: PlattCalibration,
}

/// Linear SVM with sigmoid-calibrated probabilities.
///
/// Positive decision values favour `classes[1]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "LinearSvmParams")]
pub struct LinearSvm {
    order: ClassOrder,
    coef: Array1<f64>,
    intercept: f64,
    calibration: PlattCalibration,
}

impl LinearSvm {
    pub fn from_params(params: LinearSvmParams) -> Result<Self, ClassifierError> {
        let order = ClassOrder::resolve(&params.classes)?;
        if params.coef.is_empty() {
            return Err(ClassifierError::Invalid("LinearSVM has no coefficients".into()));
        }
        let finite = params.coef.iter().all(|c| c.is_finite())
            && params.intercept.is_finite()
            && params.calibration.a.is_finite()
            && params.calibration.b.is_finite();
        if !finite {
            return Err(ClassifierError::Invalid(
                "LinearSVM parameters must be finite".into(),
            ));
        }
        Ok(Self {
            order,
            coef: Array1::from(params.coef),
            intercept: params.intercept,
            calibration: params.calibration,
        })
    }

    pub fn decision_function(
        &self,
        features: ArrayView2<'_, f64>,
    ) -> Result<Array1<f64>, ClassifierError> {
        self.check_shape(features)?;
        Ok(features.dot(&self.coef) + self.intercept)
    }
}

impl TryFrom<LinearSvmParams> for LinearSvm {
    type Error = ClassifierError;

    fn try_from(params: LinearSvmParams) -> Result<Self, Self::Error> {
        Self::from_params(params)
    }
}

impl SentimentModel for LinearSvm {
    fn name(&self) -> &str {
        "LinearSVM"
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict_proba(
        &self,
        features: ArrayView2<'_, f64>,
    ) -> Result<Vec<ProbabilityPair>, ClassifierError> {
        let decisions = self.decision_function(features)?;
        Ok(decisions
            .iter()
            .map(|&f| {
                let second = self.calibration.probability(f);
                if self.order.positive == 1 {
                    ProbabilityPair::from_positive(second)
                } else {
                    ProbabilityPair::from_positive(1.0 - second)
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn params(classes: Vec<Sentiment>) -> LinearSvmParams {
        LinearSvmParams {
            classes,
            coef: vec![2.0, -2.0],
            intercept: 0.0,
            calibration: PlattCalibration { a: -1.5, b: 0.0 },
        }
    }

    #[test]
    fn test_decision_and_probability() {
        let svm = LinearSvm::from_params(params(vec![Sentiment::Negative, Sentiment::Positive]))
            .unwrap();
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        let d = svm.decision_function(x.view()).unwrap();
        assert_eq!(d, array![2.0, -2.0]);

        let probs = svm.predict_proba(x.view()).unwrap();
        let expected = 1.0 / (1.0 + (-3.0f64).exp());
        assert!((probs[0].positive - expected).abs() < 1e-9);
        assert!((probs[1].negative - expected).abs() < 1e-9);
        assert_eq!(
            svm.predict(x.view()).unwrap(),
            vec![Sentiment::Positive, Sentiment::Negative]
        );
    }

    #[test]
    fn test_reversed_class_declaration() {
        let svm = LinearSvm::from_params(params(vec![Sentiment::Positive, Sentiment::Negative]))
            .unwrap();
        // positive decision now favours the second declared class: negative
        let probs = svm.predict_proba(array![[1.0, 0.0]].view()).unwrap();
        assert!(probs[0].negative > probs[0].positive);
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut p = params(vec![Sentiment::Negative, Sentiment::Positive]);
        p.intercept = f64::NAN;
        assert!(LinearSvm::from_params(p).is_err());
    }

    #[test]
    fn test_deserializes_from_json() {
        let svm: LinearSvm = serde_json::from_str(
            r#"{"classes": ["negative", "positive"], "coef": [1.0], "intercept": -0.5,
                "calibration": {"a": -2.0, "b": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(svm.n_features(), 1);
        let err: Result<LinearSvm, _> = serde_json::from_str(
            r#"{"classes": ["positive"], "coef": [1.0], "intercept": 0.0,
                "calibration": {"a": -2.0, "b": 0.0}}"#,
        );
        assert!(err.is_err());
    }
}
