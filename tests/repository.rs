use chrono::NaiveDate;

use gizi_dashboard::domain::report::ReportWindow;
use gizi_dashboard::domain::role::{NewRole, RoleType, UpdateRole};
use gizi_dashboard::domain::student::{Gender, NewStudent, UpdateStudent};
use gizi_dashboard::domain::supplier::{
    NewSupplier, SupplierCategory, SupplierStatus, UpdateSupplier,
};
use gizi_dashboard::domain::waste_record::{
    NewWasteRecord, UpdateWasteRecord, WasteCategory, WasteSource,
};
use gizi_dashboard::repository::{
    DieselRepository, ReportReader, RoleListQuery, RoleReader, RoleWriter, StudentListQuery,
    StudentReader, StudentWriter, SupplierListQuery, SupplierReader, SupplierWriter,
    WasteListQuery, WasteRecordReader, WasteRecordWriter,
};

mod common;

fn new_student(school_id: i32, nisn: &str, name: &str, grade: &str, gender: Gender) -> NewStudent {
    NewStudent::new(
        school_id,
        nisn.to_string(),
        name.to_string(),
        grade.to_string(),
        gender,
        None,
    )
}

#[test]
fn test_role_repository_crud() {
    let test_db = common::TestDb::new("test_role_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let created = repo
        .create_role(&NewRole::new(
            1,
            "Nutritionist".to_string(),
            "Plans menus".to_string(),
            RoleType::Custom,
            vec!["students.view".to_string(), "reports.view".to_string()],
        ))
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.permissions.len(), 2);

    repo.create_role(&NewRole::new(
        1,
        "Administrator".to_string(),
        String::new(),
        RoleType::System,
        vec!["roles.manage".to_string()],
    ))
    .unwrap();

    let (total, roles) = repo.list_roles(RoleListQuery::new(1)).unwrap();
    assert_eq!(total, 2);
    assert_eq!(roles.len(), 2);
    // Ordered by name.
    assert_eq!(roles[0].name, "Administrator");

    // Other schools see nothing.
    let (other_total, _) = repo.list_roles(RoleListQuery::new(2)).unwrap();
    assert_eq!(other_total, 0);
    assert!(repo.get_role_by_id(created.id, 2).unwrap().is_none());

    let (search_total, search_roles) = repo
        .list_roles(RoleListQuery::new(1).search("menus"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_roles[0].name, "Nutritionist");

    let (system_total, _) = repo
        .list_roles(RoleListQuery::new(1).role_type(RoleType::System))
        .unwrap();
    assert_eq!(system_total, 1);

    let (perm_total, perm_roles) = repo
        .list_roles(RoleListQuery::new(1).permission("roles.manage"))
        .unwrap();
    assert_eq!(perm_total, 1);
    assert_eq!(perm_roles[0].name, "Administrator");

    let updated = repo
        .update_role(
            created.id,
            &UpdateRole::new(
                "Dietician".to_string(),
                created.description.clone(),
                RoleType::Custom,
                vec!["students.view".to_string()],
            ),
        )
        .unwrap();
    assert_eq!(updated.name, "Dietician");
    assert_eq!(updated.permissions, vec!["students.view"]);

    repo.delete_role(created.id).unwrap();
    assert!(repo.get_role_by_id(created.id, 1).unwrap().is_none());
}

#[test]
fn test_permissions_union_for_roles() {
    let test_db = common::TestDb::new("test_permissions_union.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    repo.create_role(&NewRole::new(
        1,
        "Kitchen".to_string(),
        String::new(),
        RoleType::Custom,
        vec!["waste.view".to_string(), "waste.manage".to_string()],
    ))
    .unwrap();
    repo.create_role(&NewRole::new(
        1,
        "Teacher".to_string(),
        String::new(),
        RoleType::Custom,
        vec!["students.view".to_string(), "waste.view".to_string()],
    ))
    .unwrap();

    let permissions = repo
        .permissions_for_roles(1, &["Kitchen".to_string(), "Teacher".to_string()])
        .unwrap();
    assert_eq!(permissions.len(), 3);
    assert!(permissions.contains(&"waste.view".to_string()));
    assert!(permissions.contains(&"students.view".to_string()));

    // Unknown roles resolve to an empty set, not an error.
    let none = repo.permissions_for_roles(1, &["Ghost".to_string()]).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_student_repository_crud_and_pagination() {
    let test_db = common::TestDb::new("test_student_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    for i in 0..23 {
        let gender = if i % 2 == 0 {
            Gender::Female
        } else {
            Gender::Male
        };
        repo.create_student(&new_student(
            1,
            &format!("00612312{i:02}"),
            &format!("Student {i:02}"),
            "4A",
            gender,
        ))
        .unwrap();
    }

    let (total, page_one) = repo
        .list_students(StudentListQuery::new(1).paginate(1, 10))
        .unwrap();
    assert_eq!(total, 23);
    assert_eq!(page_one.len(), 10);

    let (_, page_three) = repo
        .list_students(StudentListQuery::new(1).paginate(3, 10))
        .unwrap();
    assert_eq!(page_three.len(), 3);

    let (female_total, _) = repo
        .list_students(StudentListQuery::new(1).gender(Gender::Female))
        .unwrap();
    assert_eq!(female_total, 12);

    let (search_total, search_items) = repo
        .list_students(StudentListQuery::new(1).search("0061231204"))
        .unwrap();
    assert_eq!(search_total, 1);
    let student = search_items[0].clone();

    let updated = repo
        .update_student(
            student.id,
            &UpdateStudent::new(
                student.nisn.clone(),
                "Renamed".to_string(),
                student.grade.clone(),
                student.gender,
                Some("peanuts".to_string()),
                false,
            ),
        )
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.allergies, Some("peanuts".to_string()));
    assert!(!updated.active);

    let (active_total, _) = repo
        .list_students(StudentListQuery::new(1).active(true))
        .unwrap();
    assert_eq!(active_total, 22);

    repo.delete_student(student.id).unwrap();
    assert!(repo.get_student_by_id(student.id, 1).unwrap().is_none());
}

#[test]
fn test_duplicate_nisn_is_a_constraint_violation() {
    let test_db = common::TestDb::new("test_duplicate_nisn.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    repo.create_student(&new_student(1, "0061231234", "Sari", "4A", Gender::Female))
        .unwrap();
    let result =
        repo.create_student(&new_student(1, "0061231234", "Other", "4B", Gender::Male));
    assert!(result.is_err());

    // Same NISN in another school is fine.
    repo.create_student(&new_student(2, "0061231234", "Elsewhere", "4A", Gender::Male))
        .unwrap();
}

#[test]
fn test_supplier_repository_crud() {
    let test_db = common::TestDb::new("test_supplier_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let created = repo
        .create_supplier(&NewSupplier::new(
            1,
            "Tani Makmur".to_string(),
            SupplierCategory::Produce,
            Some("Pak Budi".to_string()),
            Some("0812-3456".to_string()),
            Some("tani@example.com".to_string()),
            None,
            SupplierStatus::Active,
        ))
        .unwrap();
    assert_eq!(created.address, None);

    repo.create_supplier(&NewSupplier::new(
        1,
        "Sumber Protein".to_string(),
        SupplierCategory::Protein,
        None,
        None,
        None,
        None,
        SupplierStatus::Inactive,
    ))
    .unwrap();

    let (produce_total, produce) = repo
        .list_suppliers(SupplierListQuery::new(1).category(SupplierCategory::Produce))
        .unwrap();
    assert_eq!(produce_total, 1);
    assert_eq!(produce[0].name, "Tani Makmur");

    let (active_total, _) = repo
        .list_suppliers(SupplierListQuery::new(1).status(SupplierStatus::Active))
        .unwrap();
    assert_eq!(active_total, 1);

    let (search_total, _) = repo
        .list_suppliers(SupplierListQuery::new(1).search("budi"))
        .unwrap();
    assert_eq!(search_total, 1);

    let updated = repo
        .update_supplier(
            created.id,
            &UpdateSupplier::new(
                created.name.clone(),
                created.category,
                created.contact_name.clone(),
                Some(String::new()),
                created.email.clone(),
                created.address.clone(),
                SupplierStatus::Inactive,
            ),
        )
        .unwrap();
    // Blank optional input clears the stored value.
    assert_eq!(updated.phone, None);
    assert_eq!(updated.status, SupplierStatus::Inactive);

    repo.delete_supplier(created.id).unwrap();
    assert!(repo.get_supplier_by_id(created.id, 1).unwrap().is_none());
}

#[test]
fn test_waste_repository_filters_and_report() {
    let test_db = common::TestDb::new("test_waste_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let june = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();

    for (day, category, source, weight) in [
        (1, WasteCategory::Leftover, WasteSource::Serving, 2.0),
        (2, WasteCategory::Leftover, WasteSource::Serving, 1.5),
        (3, WasteCategory::Spoiled, WasteSource::Storage, 0.75),
        (10, WasteCategory::Preparation, WasteSource::Kitchen, 3.0),
    ] {
        repo.create_waste_record(&NewWasteRecord::new(
            1,
            june(day),
            category,
            source,
            weight,
            None,
        ))
        .unwrap();
    }

    let (total, records) = repo.list_waste_records(WasteListQuery::new(1)).unwrap();
    assert_eq!(total, 4);
    // Newest first.
    assert_eq!(records[0].recorded_on, june(10));

    let (leftover_total, _) = repo
        .list_waste_records(WasteListQuery::new(1).category(WasteCategory::Leftover))
        .unwrap();
    assert_eq!(leftover_total, 2);

    let (windowed_total, _) = repo
        .list_waste_records(WasteListQuery::new(1).recorded_between(june(1), june(3)))
        .unwrap();
    assert_eq!(windowed_total, 3);

    let record = records[0].clone();
    let updated = repo
        .update_waste_record(
            record.id,
            &UpdateWasteRecord::new(
                record.recorded_on,
                record.category,
                record.source,
                4.25,
                Some("re-weighed".to_string()),
            ),
        )
        .unwrap();
    assert_eq!(updated.weight_kg, 4.25);
    assert_eq!(updated.notes, Some("re-weighed".to_string()));

    let totals = repo
        .dashboard_totals(
            1,
            ReportWindow {
                from: june(1),
                until: june(30),
            },
        )
        .unwrap();
    assert_eq!(totals.waste_total_kg, 2.0 + 1.5 + 0.75 + 4.25);
    let leftover = totals
        .waste_by_category
        .iter()
        .find(|t| t.category == WasteCategory::Leftover)
        .unwrap();
    assert_eq!(leftover.total_kg, 3.5);
    // Categories with no records still appear, zeroed.
    let packaging = totals
        .waste_by_category
        .iter()
        .find(|t| t.category == WasteCategory::Packaging)
        .unwrap();
    assert_eq!(packaging.total_kg, 0.0);

    repo.delete_waste_record(record.id).unwrap();
    assert!(repo.get_waste_record_by_id(record.id, 1).unwrap().is_none());
}
