//! Mapping of `apiVersion` + `kind` to Swagger definition keys.

/// Namespace every Kubernetes API definition key starts with.
pub const DEFAULT_NAMESPACE: &str = "io.k8s.api";

/// Suffix dropped from API group names (`apps.k8s.io` → `apps`).
pub const DEFAULT_GROUP_SUFFIX: &str = ".k8s.io";

/// Build the definition key of an API object.
///
/// `v1` is the core group. For `group/version` the group loses
/// `group_suffix` if it ends with it. Slashes become dots, and the result is
/// `namespace_prefix.group.version.kind`. Never fails; an unknown object
/// surfaces when the key is resolved.
///
/// ```
/// use kubeyaml::keys::resolve_key;
///
/// assert_eq!(
///     resolve_key("certificates.k8s.io/v1beta1", "CertificateSigningRequest", "io.k8s.api", ".k8s.io"),
///     "io.k8s.api.certificates.v1beta1.CertificateSigningRequest",
/// );
/// ```
pub fn resolve_key(
    api_version: &str,
    kind: &str,
    namespace_prefix: &str,
    group_suffix: &str,
) -> String {
    let api_version = if api_version == "v1" {
        "core/v1"
    } else {
        api_version
    };

    let parts: Vec<&str> = api_version.split('/').collect();
    let rewritten = match parts.as_slice() {
        [group, version] => {
            let group = group.strip_suffix(group_suffix).unwrap_or(group);
            format!("{}.{}", group, version)
        }
        _ => api_version.replace('/', "."),
    };

    format!("{}.{}.{}", namespace_prefix, rewritten, kind)
}

/// Resolves definition keys under one namespace and group suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKeyer {
    namespace: String,
    suffix: String,
}

impl ApiKeyer {
    pub fn new(namespace: impl Into<String>, suffix: impl Into<String>) -> Self {
        ApiKeyer {
            namespace: namespace.into(),
            suffix: suffix.into(),
        }
    }

    /// Definition key of the object as listed in the schema document.
    pub fn api_key(&self, api_version: &str, kind: &str) -> String {
        resolve_key(api_version, kind, &self.namespace, &self.suffix)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Default for ApiKeyer {
    fn default() -> Self {
        ApiKeyer::new(DEFAULT_NAMESPACE, DEFAULT_GROUP_SUFFIX)
    }
}
