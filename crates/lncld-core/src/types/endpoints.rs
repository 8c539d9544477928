//! Endpoint resolution.

use crate::types::{ApiBase, ClassName, ObjectId};

/// REST API version prefix shared by every path.
const API_VERSION: &str = "/1.1";

/// The absolute URLs a client talks to, derived once from configuration.
///
/// Resolution is pure string interpolation: no network access and no
/// failure modes beyond those of the validated inputs.
///
/// # Example
///
/// ```
/// use lncld_core::{ApiBase, AppId, ClassName, Endpoints};
///
/// let app = AppId::new("myapp").unwrap();
/// let class = ClassName::new("Video").unwrap();
/// let endpoints = Endpoints::new(&ApiBase::for_app(&app).unwrap(), &class);
///
/// assert_eq!(endpoints.collection(), "https://myapp.api.lncldglobal.com/1.1/classes/Video");
/// assert_eq!(endpoints.batch(), "https://myapp.api.lncldglobal.com/1.1/batch");
/// assert_eq!(
///     endpoints.search(),
///     "https://myapp.api.lncldglobal.com/1.1/search/select?clazz=Video"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base: ApiBase,
    class_path: String,
    collection: String,
    search: String,
    batch: String,
}

impl Endpoints {
    /// Resolve the endpoints for a class under an API base.
    pub fn new(base: &ApiBase, class: &ClassName) -> Self {
        let class_path = format!("{}/classes/{}", API_VERSION, class.as_str());
        Self {
            collection: base.join(&class_path),
            search: base.join(&format!(
                "{}/search/select?clazz={}",
                API_VERSION,
                class.as_str()
            )),
            batch: base.join(&format!("{}/batch", API_VERSION)),
            base: base.clone(),
            class_path,
        }
    }

    /// Returns the API base the endpoints were resolved against.
    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    /// Collection endpoint used for filtered, paginated reads.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Per-object endpoint.
    pub fn object(&self, object_id: &ObjectId) -> String {
        format!("{}/{}", self.collection, object_id.as_str())
    }

    /// Search endpoint. Already carries the `clazz` parameter.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Batch endpoint.
    pub fn batch(&self) -> &str {
        &self.batch
    }

    /// Server-relative collection path, as used inside batch sub-requests.
    pub fn class_path(&self) -> &str {
        &self.class_path
    }

    /// Server-relative per-object path, as used inside batch sub-requests.
    pub fn object_path(&self, object_id: &ObjectId) -> String {
        format!("{}/{}", self.class_path, object_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        let base = ApiBase::new("http://localhost:8080").unwrap();
        Endpoints::new(&base, &ClassName::new("Video").unwrap())
    }

    #[test]
    fn object_urls() {
        let e = endpoints();
        let id = ObjectId::new("abc123").unwrap();
        assert_eq!(e.object(&id), "http://localhost:8080/1.1/classes/Video/abc123");
        assert_eq!(e.object_path(&id), "/1.1/classes/Video/abc123");
        assert_eq!(e.class_path(), "/1.1/classes/Video");
    }

    #[test]
    fn resolution_is_deterministic() {
        assert_eq!(endpoints(), endpoints());
    }
}
