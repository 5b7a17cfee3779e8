use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::quantity_matrix::QuantityMatrixDto;
use crate::uuid_aggregate_id;
use serde::{Deserialize, Serialize};

uuid_aggregate_id!(
    /// ID типа для справочника Шаблоны раскроя
    QuantityTemplateId
);

/// Шаблон раскроя (агрегат a003): произвольная разбивка количества по строкам и колонкам
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityTemplate {
    #[serde(flatten)]
    pub base: BaseAggregate<QuantityTemplateId>,

    pub matrix: QuantityMatrixDto,
}

/// DTO для создания/обновления шаблона
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityTemplateDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub matrix: QuantityMatrixDto,
}

impl AggregateRoot for QuantityTemplate {
    type Id = QuantityTemplateId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "quantity_template"
    }

    fn element_name() -> &'static str {
        "Шаблон раскроя"
    }

    fn list_name() -> &'static str {
        "Шаблоны раскроя"
    }
}
