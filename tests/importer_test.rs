// ==========================================
// CostSheetImporter 集成测试
// ==========================================
// 测试目标: 解析 → DQ 校验 → 落库; 违规零件整体阻断
// ==========================================


use std::io::Write;
use std::sync::{Arc, Mutex};

use engine_cost_dashboard::domain::types::DqLevel;
use engine_cost_dashboard::importer::cost_importer::CostSheetImporter;
use engine_cost_dashboard::importer::error::ImportError;
use engine_cost_dashboard::repository::part_repo::PartCatalogRepository;
use tempfile::NamedTempFile;
use test_helpers::{create_test_db, open_test_connection};

const HEADER: &str = "part_no,part_name,model,destination,current_period,last_year_period,component_key,component_name,current_amount,last_year_amount,sub_part_no,sub_part_name,quantity,amount";

/// 生成一个零件的 15 行成本构成（合计由明细推导, 结构一致）
fn component_lines(part_no: &str, jsp: (f64, f64)) -> Vec<String> {
    let msp = (500.0, 520.0);
    let local_overhead = (300.0, 280.0);
    let raw_material = (200.0, 210.0);
    let tooling = (100.0, 100.0);
    let labor = (150.0, 140.0);
    let fixed_foh = (80.0, 80.0);
    let variable_foh = (60.0, 65.0);
    let machine_dep = (40.0, 40.0);
    let building_dep = (20.0, 20.0);

    let nonlva_total = (jsp.0 + msp.0, jsp.1 + msp.1);
    let lva_total = (
        local_overhead.0 + raw_material.0,
        local_overhead.1 + raw_material.1,
    );
    let purchase_total = (
        nonlva_total.0 + lva_total.0 + tooling.0,
        nonlva_total.1 + lva_total.1 + tooling.1,
    );
    let proc_total = (
        labor.0 + fixed_foh.0 + variable_foh.0 + machine_dep.0 + building_dep.0,
        labor.1 + fixed_foh.1 + variable_foh.1 + machine_dep.1 + building_dep.1,
    );
    let total = (
        purchase_total.0 + proc_total.0,
        purchase_total.1 + proc_total.1,
    );

    let rows: Vec<(&str, (f64, f64))> = vec![
        ("NONLVA_JSP", jsp),
        ("NONLVA_MSP", msp),
        ("NONLVA_TOTAL", nonlva_total),
        ("LVA_LOCAL_OVERHEAD", local_overhead),
        ("LVA_RAW_MATERIAL", raw_material),
        ("LVA_TOTAL", lva_total),
        ("TOOLING_OUTHOUSE", tooling),
        ("PURCHASE_TOTAL", purchase_total),
        ("PROC_LABOR", labor),
        ("PROC_FIXED_FOH", fixed_foh),
        ("PROC_VARIABLE_FOH", variable_foh),
        ("PROC_MACHINE_DEPRECIATION", machine_dep),
        ("PROC_BUILDING_DEPRECIATION", building_dep),
        ("PROC_TOTAL", proc_total),
        ("TOTAL_COST", total),
    ];

    rows.into_iter()
        .map(|(key, (current, last))| {
            format!(
                "{},TEST PART,1GD,Domestic,august-2025,august-2024,{},,{},{},,,,",
                part_no, key, current, last
            )
        })
        .collect()
}

fn sub_part_line(part_no: &str, key: &str, sub_no: &str, quantity: f64, amount: f64) -> String {
    format!(
        "{},,,,,,{},,,,{},SUB {},{},{}",
        part_no, key, sub_no, sub_no, quantity, amount
    )
}

fn write_sheet(lines: &[String]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp csv");
    writeln!(file, "{}", HEADER).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn build_importer(db_path: &str) -> (CostSheetImporter, Arc<PartCatalogRepository>) {
    let conn = Arc::new(Mutex::new(
        open_test_connection(db_path).expect("Failed to open db"),
    ));
    let repo = Arc::new(PartCatalogRepository::from_connection(conn));
    (CostSheetImporter::new(repo.clone()), repo)
}

#[test]
fn test_import_full_sheet_succeeds() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let (importer, repo) = build_importer(&db_path);

    let mut lines = component_lines("12100-0101", (1200.0, 1000.0));
    lines.push(sub_part_line("12100-0101", "NONLVA_JSP", "90119-0001", 4.0, 120.5));
    lines.push(sub_part_line("12100-0101", "NONLVA_MSP", "90430-0002", 1.0, 80.0));
    let sheet = write_sheet(&lines);

    let summary = importer.import_file(sheet.path()).expect("Import should run");

    assert_eq!(summary.success_parts, vec!["12100-0101"]);
    assert!(summary.blocked_parts.is_empty());
    assert_eq!(summary.total_rows, 17);

    // 落库后可完整装配
    let part = repo
        .find_part("12100-0101")
        .expect("Query should work")
        .expect("Part should exist");
    assert_eq!(part.costs.non_lva.jsp.current_year, 1200.0);
    assert_eq!(part.costs.non_lva.jsp.difference, 200.0);
    assert!(part.costs.verify_totals(0.01).is_empty());

    let jsp_parts = part.costs.non_lva.jsp.parts.as_ref().expect("JSP sub parts");
    assert_eq!(jsp_parts.len(), 1);
    assert_eq!(jsp_parts[0].part_number, "90119-0001");
    let msp_parts = part.costs.non_lva.msp.parts.as_ref().expect("MSP sub parts");
    assert_eq!(msp_parts[0].amount, 80.0);
}

#[test]
fn test_unknown_component_key_blocks_part() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let (importer, repo) = build_importer(&db_path);

    let mut lines = component_lines("12100-0101", (1200.0, 1000.0));
    lines.push(format!(
        "12100-0101,TEST PART,1GD,Domestic,august-2025,august-2024,BOGUS_KEY,,1,1,,,,"
    ));
    let sheet = write_sheet(&lines);

    let summary = importer.import_file(sheet.path()).expect("Import should run");

    assert!(summary.success_parts.is_empty());
    assert_eq!(summary.blocked_parts, vec!["12100-0101"]);
    assert!(summary.violations.iter().any(|v| {
        v.level == DqLevel::Error && v.field == "component_key" && v.message.contains("BOGUS_KEY")
    }));

    // 阻断零件不落半截数据
    assert!(repo.find_part("12100-0101").unwrap().is_none());
}

#[test]
fn test_total_mismatch_blocks_part() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let (importer, repo) = build_importer(&db_path);

    let mut lines = component_lines("12100-0101", (1200.0, 1000.0));
    // 篡改非LVA合计行
    let idx = lines
        .iter()
        .position(|l| l.contains("NONLVA_TOTAL"))
        .unwrap();
    lines[idx] = format!(
        "12100-0101,TEST PART,1GD,Domestic,august-2025,august-2024,NONLVA_TOTAL,,9999,1520,,,,"
    );
    let sheet = write_sheet(&lines);

    let summary = importer.import_file(sheet.path()).expect("Import should run");

    assert_eq!(summary.blocked_parts, vec!["12100-0101"]);
    assert!(summary.violations.iter().any(|v| {
        v.level == DqLevel::Error && v.field == "NONLVA_TOTAL.current_year"
    }));
    assert!(repo.find_part("12100-0101").unwrap().is_none());
}

#[test]
fn test_negative_amount_warns_but_imports() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let (importer, repo) = build_importer(&db_path);

    // 负数金额 (冲销) 允许导入, 但要留 Warning
    let lines = component_lines("12100-0101", (-100.0, 50.0));
    let sheet = write_sheet(&lines);

    let summary = importer.import_file(sheet.path()).expect("Import should run");

    assert_eq!(summary.success_parts, vec!["12100-0101"]);
    assert!(summary.warning_count >= 1);
    assert!(summary
        .violations
        .iter()
        .any(|v| v.level == DqLevel::Warning && v.field == "amount"));

    let part = repo.find_part("12100-0101").unwrap().unwrap();
    assert_eq!(part.costs.non_lva.jsp.current_year, -100.0);
}

#[test]
fn test_missing_part_no_row_is_blocked_alone() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let (importer, _repo) = build_importer(&db_path);

    let mut lines = component_lines("12100-0101", (1200.0, 1000.0));
    lines.push(",,,,,,NONLVA_JSP,,1,1,,,,".to_string());
    let sheet = write_sheet(&lines);

    let summary = importer.import_file(sheet.path()).expect("Import should run");

    // 缺主键的行单独阻断, 不影响其他零件
    assert_eq!(summary.success_parts, vec!["12100-0101"]);
    assert!(summary
        .violations
        .iter()
        .any(|v| v.level == DqLevel::Error && v.field == "part_no"));
}

#[test]
fn test_missing_components_block_part() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let (importer, _repo) = build_importer(&db_path);

    // 只给 2 行成本构成
    let lines = vec![
        "12100-0101,TEST PART,1GD,Domestic,august-2025,august-2024,NONLVA_JSP,,1200,1000,,,,"
            .to_string(),
        "12100-0101,TEST PART,1GD,Domestic,august-2025,august-2024,NONLVA_MSP,,500,520,,,,"
            .to_string(),
    ];
    let sheet = write_sheet(&lines);

    let summary = importer.import_file(sheet.path()).expect("Import should run");

    assert_eq!(summary.blocked_parts, vec!["12100-0101"]);
    assert!(summary
        .violations
        .iter()
        .any(|v| v.level == DqLevel::Error && v.message.contains("成本构成不完整")));
}

#[test]
fn test_file_not_found_is_file_level_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let (importer, _repo) = build_importer(&db_path);

    let result = importer.import_file("no_such_sheet.csv");
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}
