pub(crate) mod requests;
pub(crate) mod responses;

pub(crate) use requests::AnalysisParameters;
pub(crate) use responses::{Feature, FeatureCollection, HealthPayload, SiteProperties};
