use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::uuid_aggregate_id;
use serde::{Deserialize, Serialize};

uuid_aggregate_id!(
    /// ID типа для справочника Этапы производства
    ProcessStepId
);

/// Этап производственного процесса (агрегат a002).
///
/// Порядок этапов задаётся полем `orden` и меняется перетаскиванием в списке.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessStep {
    #[serde(flatten)]
    pub base: BaseAggregate<ProcessStepId>,

    /// Порядковый номер (1..N)
    pub orden: u32,
}

/// Строка списка этапов.
///
/// `id == None` для ещё не сохранённой строки.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStepDto {
    pub id: Option<String>,
    pub code: String,
    pub description: String,
    pub orden: u32,
}

impl AggregateRoot for ProcessStep {
    type Id = ProcessStepId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "process_step"
    }

    fn element_name() -> &'static str {
        "Этап производства"
    }

    fn list_name() -> &'static str {
        "Этапы производства"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_carries_only_base_fields_and_orden() {
        let step = ProcessStep {
            base: BaseAggregate::new(ProcessStepId::new_v4(), "S-01".into(), "Раскрой".into()),
            orden: 2,
        };
        let json = serde_json::to_value(&step).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["code", "comment", "description", "id", "metadata", "orden"]
        );
    }
}
