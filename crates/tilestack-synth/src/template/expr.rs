//! CloudFormation values: literals and the intrinsic functions the stack uses.
use serde::{Serialize, Serializer, ser::SerializeMap};

/// A property value that is either a literal or resolved at deploy time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Plain string.
    Lit(String),
    /// `{"Ref": id}`: a resource's primary identifier or a pseudo parameter.
    Ref(String),
    /// `{"Fn::GetAtt": [id, attribute]}`.
    GetAtt(String, String),
    /// `{"Fn::Join": [delimiter, [parts...]]}`.
    Join(String, Vec<Expr>),
}

impl Expr {
    pub fn lit(s: impl Into<String>) -> Self {
        Expr::Lit(s.into())
    }

    pub fn reference(id: impl Into<String>) -> Self {
        Expr::Ref(id.into())
    }

    pub fn get_att(id: impl Into<String>, attr: impl Into<String>) -> Self {
        Expr::GetAtt(id.into(), attr.into())
    }

    pub fn join(delimiter: impl Into<String>, parts: Vec<Expr>) -> Self {
        Expr::Join(delimiter.into(), parts)
    }

    /// `{"Ref": "AWS::Region"}`.
    pub fn region() -> Self {
        Expr::Ref("AWS::Region".into())
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Lit(s.to_string())
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Lit(s)
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expr::Lit(s) => serializer.serialize_str(s),
            Expr::Ref(id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", id)?;
                map.end()
            }
            Expr::GetAtt(id, attr) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[id, attr])?;
                map.end()
            }
            Expr::Join(delimiter, parts) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &(delimiter, parts))?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Expr;

    #[test]
    fn serializes_intrinsics() {
        assert_eq!(serde_json::to_value(Expr::lit("x")).unwrap(), json!("x"));
        assert_eq!(
            serde_json::to_value(Expr::reference("Cluster")).unwrap(),
            json!({"Ref": "Cluster"})
        );
        assert_eq!(
            serde_json::to_value(Expr::get_att("Sg", "GroupId")).unwrap(),
            json!({"Fn::GetAtt": ["Sg", "GroupId"]})
        );
        assert_eq!(
            serde_json::to_value(Expr::join("", vec!["integrations/".into(), Expr::reference("Int")]))
                .unwrap(),
            json!({"Fn::Join": ["", ["integrations/", {"Ref": "Int"}]]})
        );
    }}
