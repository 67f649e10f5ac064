use super::resolver::*;
use super::self_prelude::*;
use super::type_cache::*;
use crate::field_type::GraphqlFieldType;

/// Build the node, edge and connection types of a model.
///
/// The default node exposes the global `id`, one field per mapping and any
/// extra `fields`. A custom node replaces it entirely, in which case the
/// connection is named after the edge.
pub fn create_edge_node_type(
    model: &dyn Model,
    fields: Vec<Field>,
    custom_node: Option<Object>,
    custom_edge_name: Option<&str>,
) -> (ModelTypes, Vec<Object>) {
    let model_name = model.model_name();
    let edge_name = custom_edge_name
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| TypeRef::connection_edge(model_name));

    let (node, connection_name) = match custom_node {
        Some(node) => (node, TypeRef::custom_connection(&edge_name)),
        None => {
            let mut node = Object::new_node(TypeRef::node(model_name), model_name);
            for (name, mapping) in model.schema().mappings.iter() {
                // `id` always resolves to the global ID.
                if name == "id" {
                    continue;
                }
                node = node.data_field(name, GraphqlFieldType::from(mapping.r#type));
            }
            for field in fields {
                node = node.field(field);
            }
            (node, TypeRef::connection(model_name))
        }
    };
    let node_name = node.type_name().to_string();

    let edge = Object::new_connection_edge::<EsormResolver>(&edge_name, &node_name);
    let connection =
        Object::new_connection::<EsormResolver>(&connection_name, &edge_name);

    (
        ModelTypes {
            node: node_name,
            edge: edge_name,
            connection: connection_name,
        },
        vec![node, edge, connection],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> MemoryModel {
        MemoryModel::new("User", ModelSchema::new().field("name", FieldType::Text))
    }

    #[test]
    fn default_type_names() {
        let (types, objects) = create_edge_node_type(&model(), vec![], None, None);
        assert_eq!(
            types,
            ModelTypes {
                node: "EsORMUserNode".to_string(),
                edge: "EsORMUserEdge".to_string(),
                connection: "EsORMUser".to_string(),
            }
        );
        let names = objects
            .iter()
            .map(|object| object.type_name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["EsORMUserNode", "EsORMUserEdge", "EsORMUser"]);
    }

    #[test]
    fn custom_node_names_connection_after_edge() {
        let custom = Object::new("UserSummary");
        let (types, _) =
            create_edge_node_type(&model(), vec![], Some(custom), Some("UserSummaryEdge"));
        assert_eq!(types.node, "UserSummary");
        assert_eq!(types.edge, "UserSummaryEdge");
        assert_eq!(types.connection, "UserSummaryEdgeConnection");

        let (types, _) =
            create_edge_node_type(&model(), vec![], Some(Object::new("UserSummary")), Some(""));
        assert_eq!(types.edge, "EsORMUserEdge");
        assert_eq!(types.connection, "EsORMUserEdgeConnection");
    }
}
