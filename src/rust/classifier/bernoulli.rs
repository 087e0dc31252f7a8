use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::model::{ClassOrder, ProbabilityPair, Sentiment, SentimentModel};
use super::utils::softmax_log;

fn default_binarize() -> Option<f64> {
    Some(0.0)
}

/// Raw parameters of a fitted Bernoulli naive Bayes model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BernoulliNbParams {
    pub classes: Vec<Sentiment>,
    pub class_log_prior: Vec<f64>,
    /// `log P(feature present | class)`, one row per class
    pub feature_log_prob: Vec<Vec<f64>>,
    /// Features strictly above this value count as present; `None` means
    /// the input is already binary
    #[serde(default = "default_binarize")]
    pub binarize: Option<f64>,
}

/// Bernoulli naive Bayes over binarized TF-IDF features.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BernoulliNbParams")]
pub struct BernoulliNb {
    order: ClassOrder,
    /// `log P(present) - log P(absent)`, shape (classes, features)
    delta_log_prob: Array2<f64>,
    /// `class_log_prior + sum(log P(absent))` per class
    base_log_prob: Array1<f64>,
    binarize: Option<f64>,
}

impl BernoulliNb {
    pub fn from_params(params: BernoulliNbParams) -> Result<Self, ClassifierError> {
        let order = ClassOrder::resolve(&params.classes)?;
        if params.class_log_prior.len() != 2 || params.feature_log_prob.len() != 2 {
            return Err(ClassifierError::Invalid(
                "BernoulliNB needs exactly two class rows".into(),
            ));
        }
        let n_features = params.feature_log_prob[0].len();
        if n_features == 0 || params.feature_log_prob[1].len() != n_features {
            return Err(ClassifierError::Invalid(
                "BernoulliNB feature_log_prob rows have different lengths".into(),
            ));
        }
        if params
            .feature_log_prob
            .iter()
            .flatten()
            .any(|&lp| lp >= 0.0 || !lp.is_finite())
        {
            return Err(ClassifierError::Invalid(
                "BernoulliNB feature_log_prob must be finite and below zero".into(),
            ));
        }
        if params.class_log_prior.iter().any(|lp| !lp.is_finite()) {
            return Err(ClassifierError::Invalid(
                "BernoulliNB class_log_prior must be finite".into(),
            ));
        }

        let flat: Vec<f64> = params.feature_log_prob.into_iter().flatten().collect();
        let log_prob = Array2::from_shape_vec((2, n_features), flat)
            .map_err(|e| ClassifierError::Invalid(e.to_string()))?;
        // ln(1 - exp(lp)), accurate for lp close to zero
        let neg_log_prob = log_prob.mapv(|lp| (-lp.exp_m1()).ln());
        let class_log_prior = Array1::from(params.class_log_prior);
        let base_log_prob = class_log_prior + neg_log_prob.sum_axis(Axis(1));
        let delta_log_prob = log_prob - &neg_log_prob;

        if neg_log_prob.iter().any(|v| !v.is_finite())
            || delta_log_prob.iter().any(|v| !v.is_finite())
            || base_log_prob.iter().any(|v| !v.is_finite())
        {
            return Err(ClassifierError::Invalid(
                "BernoulliNB parameters overflow in log space".into(),
            ));
        }

        Ok(Self {
            order,
            delta_log_prob,
            base_log_prob,
            binarize: params.binarize,
        })
    }

    fn joint_log_likelihood(&self, features: ArrayView2<'_, f64>) -> Array2<f64> {
        let binary = match self.binarize {
            Some(threshold) => features.mapv(|x| if x > threshold { 1.0 } else { 0.0 }),
            None => features.to_owned(),
        };
        binary.dot(&self.delta_log_prob.t()) + &self.base_log_prob
    }
}

impl TryFrom<BernoulliNbParams> for BernoulliNb {
    type Error = ClassifierError;

    fn try_from(params: BernoulliNbParams) -> Result<Self, Self::Error> {
        Self::from_params(params)
    }
}

impl SentimentModel for BernoulliNb {
    fn name(&self) -> &str {
        "BernoulliNB"
    }

    fn n_features(&self) -> usize {
        self.delta_log_prob.ncols()
    }

    fn predict_proba(
        &self,
        features: ArrayView2<'_, f64>,
    ) -> Result<Vec<ProbabilityPair>, ClassifierError> {
        self.check_shape(features)?;
        let jll = self.joint_log_likelihood(features);
        Ok(jll
            .rows()
            .into_iter()
            .map(|row| self.order.pair(softmax_log(&row.to_owned()).view()))
            .collect())
    }
}
