use rdowntime::core::parser::{ParseError, parse, parse_with_diagnostics};
use rdowntime::models::event_kind::EventKind;
use rdowntime::models::record::{FIELD_MISSING, FIELD_NOT_SPECIFIED};

mod common;
use common::{END_REPLY, ERROR_REPLY, START_REPLY};

#[test]
fn test_canonical_replies_extract_all_fields() {
    let start = parse(START_REPLY);
    assert_eq!(start.kind, EventKind::DowntimeStart);
    assert_eq!(start.workshop, "12");
    assert_eq!(start.unit, "ПА-05");
    assert_eq!(start.info, None);

    let end = parse(END_REPLY);
    assert_eq!(end.kind, EventKind::DowntimeEnd);
    assert_eq!(end.workshop, "12");
    assert_eq!(end.unit, "ПА-05");
    assert_eq!(end.info, None);

    let err = parse(ERROR_REPLY);
    assert_eq!(err.kind, EventKind::ErrorReport);
    assert_eq!(err.workshop, "3");
    assert_eq!(err.unit, "ЛМ-789");
    assert_eq!(
        err.info.as_deref(),
        Some("Гидравлическая утечка, требуется срочный ремонт")
    );
}

#[test]
fn test_quoted_type_values_are_accepted() {
    let quoted = parse("[Тип: \"Появление ошибки\"]\n[Цех: 1]\n[Агрегат: A]");
    assert_eq!(quoted.declared_kind, EventKind::ErrorReport);

    let guillemets = parse("[Тип: «Начало простоя»]\n[Цех: 1]\n[Агрегат: A]");
    assert_eq!(guillemets.kind, EventKind::DowntimeStart);

    let lower = parse("[Тип: устранение простоя.]\n[Цех: 1]\n[Агрегат: A]");
    assert_eq!(lower.kind, EventKind::DowntimeEnd);
}

#[test]
fn test_multiline_info_is_joined_with_spaces() {
    let reply = "[Тип: Появление ошибки]\n\
                 [Цех: 7]\n\
                 [Агрегат: ТП-2]\n\
                 [Информация: Утечка масла\n\
                 из гидроцилиндра\n\
                 требуется ремонт]";

    let rec = parse(reply);
    assert_eq!(
        rec.info.as_deref(),
        Some("Утечка масла из гидроцилиндра требуется ремонт")
    );
    assert_eq!(rec.unit, "ТП-2");
}

#[test]
fn test_info_keeps_embedded_colons() {
    let rec = parse("[Тип: Появление ошибки]\n[Информация: Код E12: перегрев: 95°C]");
    assert_eq!(rec.info.as_deref(), Some("Код E12: перегрев: 95°C"));
}

#[test]
fn test_malformed_line_does_not_abort_parsing() {
    let reply = "[Тип: Начало простоя]\n[Цех without colon]\n[Агрегат: ПА-05]";

    let outcome = parse_with_diagnostics(reply);
    assert_eq!(outcome.record.kind, EventKind::DowntimeStart);
    assert_eq!(outcome.record.workshop, FIELD_MISSING);
    assert_eq!(outcome.record.unit, "ПА-05");
    assert_eq!(outcome.skipped.len(), 1);
    assert!(matches!(
        outcome.skipped[0],
        ParseError::MissingSeparator { line: 2, tag: "Цех", .. }
    ));
}

#[test]
fn test_empty_value_is_skipped() {
    let outcome = parse_with_diagnostics("[Тип: Начало простоя]\n[Цех: ]\n[Агрегат: 5]");
    assert_eq!(outcome.record.workshop, FIELD_MISSING);
    assert_eq!(outcome.record.unit, "5");
    assert_eq!(
        outcome.skipped,
        vec![ParseError::EmptyValue { line: 2, tag: "Цех" }]
    );
}

#[test]
fn test_missing_type_tag_yields_unknown() {
    let rec = parse("[Цех: 4]\n[Агрегат: КР-1]");
    assert_eq!(rec.kind, EventKind::Unknown);
    assert_eq!(rec.kind.label(), "не определено");
    assert_eq!(rec.workshop, "4");
}

#[test]
fn test_unrecognised_type_phrase_is_unknown() {
    let rec = parse("[Тип: Плановое обслуживание]\n[Цех: 4]\n[Агрегат: КР-1]");
    assert_eq!(rec.kind, EventKind::Unknown);
}

#[test]
fn test_info_promotes_declared_type_to_error() {
    let rec = parse("[Тип: Начало простоя]\n[Цех: 2]\n[Агрегат: Б-1]\n[Информация: течь]");
    assert_eq!(rec.kind, EventKind::ErrorReport);
    assert_eq!(rec.declared_kind, EventKind::DowntimeStart);
    assert!(rec.was_promoted());
    assert_eq!(rec.info.as_deref(), Some("течь"));
}

#[test]
fn test_not_specified_info_does_not_promote() {
    let rec = parse("[Тип: Начало простоя]\n[Цех: 2]\n[Агрегат: Б-1]\n[Информация: не указано]");
    assert_eq!(rec.kind, EventKind::DowntimeStart);
    assert!(!rec.was_promoted());
    assert_eq!(rec.info, None);

    let err = parse("[Тип: Появление ошибки]\n[Цех: 2]\n[Агрегат: Б-1]\n[Информация: Не указано]");
    assert_eq!(err.kind, EventKind::ErrorReport);
    assert_eq!(err.info, None);
}

#[test]
fn test_quotes_and_chatter_are_stripped() {
    let reply = "Ответ:\n\n  [Тип: Начало простоя]  \n[Цех: \"12\"]\n[Агрегат: \"ПА-05\"]\nСпасибо!";
    let rec = parse(reply);
    assert_eq!(rec.workshop, "12");
    assert_eq!(rec.unit, "ПА-05");
    assert_eq!(rec.info, None);
}

#[test]
fn test_not_specified_sentinel_is_kept() {
    let rec = parse("[Тип: Начало простоя]\n[Цех: не указано]\n[Агрегат: не указано]");
    assert_eq!(rec.workshop, FIELD_NOT_SPECIFIED);
    assert_eq!(rec.unit, FIELD_NOT_SPECIFIED);
}

#[test]
fn test_empty_reply_is_unknown_with_sentinels() {
    let rec = parse("");
    assert_eq!(rec.kind, EventKind::Unknown);
    assert_eq!(rec.workshop, FIELD_MISSING);
    assert_eq!(rec.unit, FIELD_MISSING);
}
