use esorm_graphql::prelude::*;
use std::sync::Arc;

#[test]
fn generated_types_are_in_the_sdl() {
    let model = Arc::new(new_test_model());
    let sdl = new_test_schema(model).unwrap().pretty_sdl();

    for expected in [
        "type EsORMTestModelNode {",
        "id: ID",
        "name: String",
        "age: Int",
        "location: JSON",
        "type EsORMTestModelEdge {",
        "cursor: String",
        "node: EsORMTestModelNode",
        "type EsORMTestModel {",
        "pageInfo: EsORMPageInfo",
        "total: Int",
        "edges: [EsORMTestModelEdge]",
        "type EsORMPageInfo {",
        "hasNextPage: Boolean",
        "input EsORMTestModelCreateInput {",
        "createTestModel(input: [EsORMTestModelCreateInput]): Boolean",
        "after: String",
        "first: Int",
        "before: String",
        "last: Int",
        "query: JSON",
        "): EsORMTestModel",
        "scalar JSON",
    ] {
        assert!(sdl.contains(expected), "missing {expected:?} in:\n{sdl}");
    }
}

#[test]
fn custom_nodes_and_extension_args() {
    let model: Arc<dyn Model> = Arc::new(new_test_model());
    let summary = async_graphql::dynamic::Object::new("TestModelSummary").data_field(
        "name",
        GraphqlFieldType::String,
    );
    let schema = EsormSchemaBuilder::new()
        .query_model(
            "testModels",
            model.clone(),
            ResolverOptions::new().argument(async_graphql::dynamic::InputValue::new(
                "groupBy",
                async_graphql::dynamic::TypeRef::named_list(
                    async_graphql::dynamic::TypeRef::STRING,
                ),
            )),
        )
        .unwrap()
        .query_model(
            "testModelSummaries",
            model,
            ResolverOptions::new()
                .custom_node(summary)
                .custom_edge_name("TestModelSummaryEdge"),
        )
        .unwrap()
        .finish()
        .unwrap();
    let sdl = schema.pretty_sdl();

    assert!(sdl.contains("groupBy: [String]"));
    assert!(sdl.contains("type TestModelSummaryEdgeConnection {"));
    assert!(sdl.contains("node: TestModelSummary"));
    assert!(!sdl.contains("type Mutation"));
}

#[test]
fn custom_node_on_the_default_edge_is_rejected() {
    let model: Arc<dyn Model> = Arc::new(new_test_model());
    let builder = EsormSchemaBuilder::new()
        .query_model("testModel", model.clone(), ResolverOptions::new())
        .unwrap();

    let summary = async_graphql::dynamic::Object::new("Summary")
        .data_field("age", GraphqlFieldType::Int);
    let result = builder.query_model(
        "summaries",
        model,
        ResolverOptions::new().custom_node(summary).custom_edge_name(""),
    );
    assert_matches::assert_matches!(
        result.err(),
        Some(GraphqlError::DuplicateTypeName(name)) if name == "EsORMTestModelEdge"
    );
}
