pub mod config;
pub mod demand;
pub mod errors;
pub mod explanation;
pub mod grouping;
pub mod jitter;
pub mod purchase;
pub mod recommend;
pub mod scoring;
pub mod taxonomy;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use demand::{predict_demand, DemandInput, DemandLevel, DemandRequest};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use explanation::{Explanation, FragmentRule, Layout};
pub use grouping::{group_for, ChildRecord, GroupingParams, PeerMatch, PlayGroup};
pub use jitter::{ConfidenceBand, FixedJitter, JitterSource, SeededJitter, ThreadJitter};
pub use purchase::{predict_purchase, PurchaseInput, PurchaseRequest, PurchaseVerdict};
pub use recommend::{
    activity_details, recommend, ActivityDetails, CatalogItem, ChildProfile, Ranker,
    Recommendation, RecommendationRequest, Recommendations,
};
pub use scoring::{ModelCard, Numeric, ScoreResult};
pub use taxonomy::{CustomerType, DemandTier, ProductCategory};
