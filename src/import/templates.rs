//! Sample files offered to administrators before an import.

pub const USER_TEMPLATE: &str = "studentNumber,name,email,role\n123456,John Doe,john@example.com,student";

pub const BOOTH_TEMPLATE: &str = "name,description,pin\nSample Booth,This is a sample booth description,123456";

pub const BOOTH_WITH_PRODUCTS_TEMPLATE: &str = concat!(
    "name,description,pin,product1Name,product1Price,product1Image,product2Name,product2Price,product2Image\n",
    "Sample Booth,This is a sample booth description,123456,Product 1,9.99,https://example.com/image1.jpg,Product 2,14.99,\n",
    "Another Booth,Another description,654321,Hot Dog,5.99,,Soda,2.50,"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Users,
    Booths,
    BoothsWithProducts,
}

pub fn template(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::Users => USER_TEMPLATE,
        TemplateKind::Booths => BOOTH_TEMPLATE,
        TemplateKind::BoothsWithProducts => BOOTH_WITH_PRODUCTS_TEMPLATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::csv::{parse_document, parse_rows, Row};
    use crate::import::validate::{validate_rows, ImportKind};

    #[test]
    fn test_templates_pass_their_own_validation() {
        for (kind, import) in [
            (TemplateKind::Users, ImportKind::Users),
            (TemplateKind::Booths, ImportKind::Booths),
            (TemplateKind::BoothsWithProducts, ImportKind::Booths),
        ] {
            let doc = parse_document(template(kind)).unwrap();
            assert!(doc.rejected.is_empty(), "{kind:?}");
            let rows: Vec<_> = doc.rows.into_iter().map(|r| r.fields).collect();
            assert_eq!(validate_rows(&rows, import), Ok(()), "{kind:?}");
        }
    }

    #[test]
    fn test_user_template_row() {
        let expected: Row = [
            ("studentNumber", "123456"),
            ("name", "John Doe"),
            ("email", "john@example.com"),
            ("role", "student"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(parse_rows(USER_TEMPLATE).unwrap(), vec![expected]);
    }
}
