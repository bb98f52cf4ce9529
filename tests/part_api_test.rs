// ==========================================
// PartApi 集成测试
// ==========================================
// 测试目标: 目录查询/前缀筛选/成本档案装配/空态
// ==========================================


use std::sync::{Arc, Mutex};

use engine_cost_dashboard::api::error::ApiError;
use engine_cost_dashboard::api::part_api::PartApi;
use engine_cost_dashboard::config::ConfigManager;
use engine_cost_dashboard::repository::part_repo::PartCatalogRepository;
use test_helpers::{create_test_db, insert_test_config, open_test_connection, seed_part, SeedAmounts};

fn build_part_api(db_path: &str) -> PartApi {
    let conn = Arc::new(Mutex::new(
        open_test_connection(db_path).expect("Failed to open db"),
    ));
    let part_repo = Arc::new(PartCatalogRepository::from_connection(conn.clone()));
    let config_manager =
        Arc::new(ConfigManager::from_connection(conn).expect("Failed to create ConfigManager"));
    PartApi::new(part_repo, config_manager)
}

#[tokio::test]
async fn test_list_catalog_ordered() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    seed_part(&conn, "12100-0202", "CYLINDER HEAD", &SeedAmounts::default()).unwrap();
    seed_part(&conn, "12100-0101", "CYLINDER BLOCK", &SeedAmounts::default()).unwrap();
    seed_part(&conn, "99900-0303", "OIL PAN", &SeedAmounts::default()).unwrap();

    let api = build_part_api(&db_path);
    let catalog = api.list_catalog(None).await.expect("Should list catalog");

    let nos: Vec<&str> = catalog.iter().map(|p| p.part_no.as_str()).collect();
    assert_eq!(nos, vec!["12100-0101", "12100-0202", "99900-0303"]);
}

#[tokio::test]
async fn test_list_catalog_prefix_filter() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_test_config(&conn).unwrap();
    seed_part(&conn, "12100-0101", "CYLINDER BLOCK", &SeedAmounts::default()).unwrap();
    seed_part(&conn, "12100-0202", "CYLINDER HEAD", &SeedAmounts::default()).unwrap();
    seed_part(&conn, "99900-0303", "OIL PAN", &SeedAmounts::default()).unwrap();

    let api = build_part_api(&db_path);
    let filtered = api
        .list_catalog(Some("12100".to_string()))
        .await
        .expect("Should filter catalog");

    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].part_no, "12100-0101");
    assert_eq!(filtered[1].part_no, "12100-0202");
}

#[tokio::test]
async fn test_prefix_filter_case_sensitivity_config() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    seed_part(&conn, "abc-0001", "SMALL CASE", &SeedAmounts::default()).unwrap();
    seed_part(&conn, "ABC-0002", "BIG CASE", &SeedAmounts::default()).unwrap();

    let api = build_part_api(&db_path);

    // 缺省: 大小写敏感
    let sensitive = api.list_catalog(Some("ABC".to_string())).await.unwrap();
    assert_eq!(sensitive.len(), 1);
    assert_eq!(sensitive[0].part_no, "ABC-0002");

    // 配置切换为不敏感
    conn.execute(
        "INSERT OR REPLACE INTO config_kv (scope_id, key, value)
         VALUES ('global', 'prefix_match_case_sensitive', 'false')",
        [],
    )
    .unwrap();

    let insensitive = api.list_catalog(Some("ABC".to_string())).await.unwrap();
    assert_eq!(insensitive.len(), 2);
}

#[tokio::test]
async fn test_get_part_detail_assembles_breakdown() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    seed_part(&conn, "12100-0101", "CYLINDER BLOCK", &SeedAmounts::default()).unwrap();

    let api = build_part_api(&db_path);
    let part = api
        .get_part_detail("12100-0101")
        .expect("Should assemble part");

    assert_eq!(part.part_no, "12100-0101");
    assert_eq!(part.model, "1GD");
    assert_eq!(part.current_date, "august-2025");
    assert_eq!(part.last_year_date, "august-2024");

    // 派生字段在装配时重算
    let jsp = &part.costs.non_lva.jsp;
    assert_eq!(jsp.current_year, 1200.0);
    assert_eq!(jsp.last_year, 1000.0);
    assert_eq!(jsp.difference, 200.0);
    assert!((jsp.percentage_change - 20.0).abs() < 1e-9);

    // JSP 携带二级零件明细, 顺序按 seq_no
    let jsp_parts = jsp.parts.as_ref().expect("JSP should carry sub parts");
    assert_eq!(jsp_parts.len(), 2);
    assert_eq!(jsp_parts[0].part_number, "90119-0001");
    assert_eq!(jsp_parts[1].part_number, "90430-0002");

    // 无明细的行 parts 为 None
    assert!(part.costs.lva.raw_material.parts.is_none());
    assert!(part.costs.total_cost.parts.is_none());

    // 合计行与明细一致 (种子数据由推导生成)
    assert!(part.costs.verify_totals(0.01).is_empty());
    assert_eq!(part.costs.total_cost.current_year, 2650.0);
}

#[tokio::test]
async fn test_get_part_detail_not_found() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let api = build_part_api(&db_path);
    let err = api.get_part_detail("00000-9999").unwrap_err();
    assert!(matches!(err, ApiError::PartNotFound(_)));
}

#[tokio::test]
async fn test_get_part_detail_rejects_blank_input() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let api = build_part_api(&db_path);
    let err = api.get_part_detail("   ").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_incomplete_breakdown_is_validation_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");

    // 只有主数据 + 一行成本构成: 装配必须报数据验证失败而不是崩溃
    conn.execute(
        r#"
        INSERT INTO part_master (
            part_no, part_name, model, destination,
            current_period, last_year_period, created_at, updated_at
        ) VALUES ('BROKEN-01', 'BROKEN', '1GD', '国内',
                  'august-2025', 'august-2024', datetime('now'), datetime('now'))
        "#,
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO cost_component (part_no, component_key, name, current_year, last_year)
         VALUES ('BROKEN-01', 'NONLVA_JSP', 'JSP', 1.0, 1.0)",
        [],
    )
    .unwrap();

    let api = build_part_api(&db_path);
    let err = api.get_part_detail("BROKEN-01").unwrap_err();
    match err {
        ApiError::ValidationError(msg) => assert!(msg.contains("BROKEN-01")),
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}
