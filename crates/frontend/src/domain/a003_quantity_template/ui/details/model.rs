use crate::shared::api_utils::{get_json, post_json};
use crate::shared::quantity_matrix::FreeEntryMatrix;
use contracts::domain::a003_quantity_template::{QuantityTemplate, QuantityTemplateDto};
use contracts::domain::common::{AggregateId, AggregateRoot};

pub async fn fetch_by_id(id: &str) -> Result<QuantityTemplate, String> {
    get_json(&format!("{}/{}", QuantityTemplate::resource_path(), id))
        .await
        .map_err(|e| e.to_string())
}

/// Создание и обновление одним запросом: без `id` сервер создаёт новую запись
pub async fn save(dto: &QuantityTemplateDto) -> Result<QuantityTemplateDto, String> {
    post_json(&QuantityTemplate::resource_path(), dto)
        .await
        .map_err(|e| e.to_string())
}

pub fn build_dto(
    id: Option<String>,
    description: &str,
    comment: &str,
    matrix: &FreeEntryMatrix,
) -> QuantityTemplateDto {
    let comment = comment.trim();
    QuantityTemplateDto {
        id,
        code: None,
        description: description.trim().to_string(),
        comment: (!comment.is_empty()).then(|| comment.to_string()),
        matrix: matrix.to_dto(),
    }
}

/// Поля формы из загруженного шаблона: (id, наименование, комментарий, матрица)
pub fn form_from(template: &QuantityTemplate) -> (String, String, String, FreeEntryMatrix) {
    (
        template.base.id.as_string(),
        template.base.description.clone(),
        template.base.comment.clone().unwrap_or_default(),
        FreeEntryMatrix::from_dto(&template.matrix),
    )
}

pub fn validate(description: &str, matrix: &FreeEntryMatrix) -> Result<(), String> {
    if description.trim().is_empty() {
        return Err("Наименование не может быть пустым".to_string());
    }
    if matrix.row_count() == 0 || matrix.column_count() == 0 {
        return Err("Добавьте хотя бы одну строку и одну колонку".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s_red_five() -> FreeEntryMatrix {
        let mut matrix = FreeEntryMatrix::new();
        let row = matrix.add_row("S");
        let col = matrix.add_column("Red");
        matrix.edit_cell(row, col, "5");
        matrix
    }

    #[test]
    fn test_build_dto_carries_matrix() {
        let dto = build_dto(None, " Базовый ", "  ", &s_red_five());
        assert_eq!(dto.description, "Базовый");
        assert_eq!(dto.comment, None);
        assert_eq!(dto.matrix.total(), 5);
        assert_eq!(dto.matrix.rows[0].label, "S");
        assert_eq!(dto.matrix.columns[0].label, "Red");
    }

    #[test]
    fn test_validate() {
        assert!(validate("Базовый", &s_red_five()).is_ok());
        assert!(validate("", &s_red_five()).is_err());
        assert!(validate("Базовый", &FreeEntryMatrix::new()).is_err());
    }
}
