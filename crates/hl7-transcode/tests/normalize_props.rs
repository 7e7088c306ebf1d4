//! Property tests for shape normalization.

use hl7_model::{Document, ShapePolicy};
use hl7_transcode::normalize;
use proptest::prelude::*;

const SHAPES: [ShapePolicy; 5] = [
    ShapePolicy::FlexibleArray,
    ShapePolicy::MultipleObjects,
    ShapePolicy::SingleObject,
    ShapePolicy::ObjectOrScalar,
    ShapePolicy::SingleScalar,
];

/// Scalars that never look like encoded JSON.
fn arb_scalar() -> impl Strategy<Value = Document> {
    "[a-zA-Z0-9 .^-]{0,12}".prop_map(Document::Scalar)
}

fn arb_document() -> impl Strategy<Value = Document> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Document::Array),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(Document::object),
        ]
    })
}

fn arb_shape() -> impl Strategy<Value = ShapePolicy> {
    prop::sample::select(SHAPES.to_vec())
}

/// The document a caller would pass to get `elements` back.
fn canonical(elements: &[Document]) -> Document {
    match elements {
        [single] => single.clone(),
        many => Document::Array(many.to_vec()),
    }
}

proptest! {
    #[test]
    fn normalization_is_deterministic(doc in arb_document(), shape in arb_shape()) {
        prop_assert_eq!(normalize(&doc, shape, "p"), normalize(&doc, shape, "p"));
    }

    #[test]
    fn normalization_is_idempotent(doc in arb_document(), shape in arb_shape()) {
        if let Ok(elements) = normalize(&doc, shape, "p") {
            let again = normalize(&canonical(&elements), shape, "p");
            prop_assert_eq!(again, Ok(elements));
        }
    }

    #[test]
    fn encoded_and_typed_forms_agree(
        doc in arb_document(),
        shape in prop::sample::select(vec![
            ShapePolicy::FlexibleArray,
            ShapePolicy::MultipleObjects,
            ShapePolicy::SingleObject,
        ]),
    ) {
        prop_assume!(!matches!(doc, Document::Scalar(_)));
        let encoded = Document::scalar(doc.to_string());
        prop_assert_eq!(
            normalize(&encoded, shape, "p").ok(),
            normalize(&doc, shape, "p").ok()
        );
    }

    #[test]
    fn elements_are_objects_unless_scalar_shaped(doc in arb_document(), shape in arb_shape()) {
        if let Ok(elements) = normalize(&doc, shape, "p") {
            for element in &elements {
                if shape == ShapePolicy::SingleScalar {
                    prop_assert!(element.as_scalar().is_some());
                } else {
                    prop_assert!(element.as_object().is_some());
                }
            }
        }
    }
}
