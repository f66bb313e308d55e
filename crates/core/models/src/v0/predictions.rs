#[cfg(feature = "validator")]
use validator::Validate;

auto_derived!(
    /// Label suggested for an image
    pub struct Prediction {
        /// Predicted label
        pub label: String,
        /// Confidence between 0 and 1
        pub score: f64,
    }

    /// Classifier outcome for one image
    pub struct ImagePrediction {
        /// Image URL as submitted
        pub image: String,
        /// Labels, best first
        #[cfg_attr(feature = "serde", serde(default))]
        pub predictions: Vec<Prediction>,
        /// Why this image could not be classified
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
        pub error: Option<String>,
    }

    /// Images to classify
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataPredict {
        /// Image URLs already uploaded to object storage
        #[cfg_attr(
            feature = "validator",
            validate(length(min = 1, max = 12), custom(function = "super::validate_urls"))
        )]
        pub images: Vec<String>,
    }
);
