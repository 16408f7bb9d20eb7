//! Header mapping from the bank export's column names to the canonical
//! schema the core pipeline works with. Headers the map does not know pass
//! through under their original names.

use svodka_core::columns;

const HEADER_MAP: &[(&str, &str)] = &[
    ("Дата операции", columns::OPERATION_DATE),
    ("Дата платежа", columns::PAYMENT_DATE),
    ("Номер карты", columns::CARD_NUMBER),
    ("Сумма операции", columns::AMOUNT),
    ("Категория", columns::CATEGORY),
    ("Описание", columns::DESCRIPTION),
];

pub fn canonical_column(header: &str) -> String {
    let trimmed = header.trim();
    HEADER_MAP
        .iter()
        .find(|(source, _)| *source == trimmed)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
