pub(crate) mod sites;

pub(crate) use sites::{nature_categories, SiteRepository};
