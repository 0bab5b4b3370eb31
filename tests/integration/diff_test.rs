use crate::{fixture_arg, specdiff_in, workspace};
use predicates::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn incompatibilities_as_text() {
    let tmp = workspace();
    let output = specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("new.yaml"),
            "--no-fail",
            "--quiet",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "- missing endpoints\n\
         \x20 - DELETE /pets/{petId} operationId:deletePet\n\
         - incompatible request params\n\
         \x20 - GET /pets operationId:listPets\n\
         \x20   - new required request param: query:status\n\
         - incompatible response attributes\n\
         \x20 - GET /pets/{petId} operationId:showPetById\n\
         \x20   - missing 404 response\n"
    );
}

#[test]
fn changes_as_text() {
    let tmp = workspace();
    specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("new.yaml"),
            "--report",
            "changes",
            "--no-fail",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- new endpoints\n  - GET /stores operationId:listStores\n",
        ))
        .stdout(predicate::str::contains(
            "- removed endpoints\n  - DELETE /pets/{petId} operationId:deletePet\n",
        ))
        .stdout(predicate::str::contains(
            "  - POST /pets operationId:createPet\n    - body:pet/name is no longer required\n    - new request param: body:pet/age\n",
        ))
        .stdout(predicate::str::contains(
            "    - new attribute for 200 response: []/age\n",
        ))
        .stdout(predicate::str::contains("    - missing 404 response\n"));
}

#[test]
fn incompatibilities_as_csv() {
    let tmp = workspace();
    let output = specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("new.yaml"),
            "--format",
            "csv",
            "--no-fail",
            "--quiet",
        ])
        .output()
        .unwrap();

    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Endpoint,OperationId,Change,Category,Sub Category,Attribute\n\
         DELETE /pets/{petId},deletePet,missing,endpoints\n\
         GET /pets,listPets,incompatible,request params,new required request param,query:status\n\
         GET /pets/{petId},showPetById,incompatible,response attributes,missing 404 response,n/a\n"
    );
}

#[test]
fn changes_as_json() {
    let tmp = workspace();
    let output = specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("new.yaml"),
            "--report",
            "changes",
            "--format",
            "json",
            "--no-fail",
            "--quiet",
        ])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["compatible"], false);
    assert_eq!(json["summary"]["endpoints_added"], 1);
    assert_eq!(json["summary"]["endpoints_removed"], 1);
    assert_eq!(
        json["changes"]["new_endpoints"][0],
        "GET /stores operationId:listStores"
    );
    assert_eq!(
        json["changes"]["removed_request_params"]["GET /pets operationId:listPets"][0]["kind"],
        "new_required_param"
    );
}

#[test]
fn identical_specifications_print_nothing() {
    let tmp = workspace();
    for format in ["text", "csv"] {
        specdiff_in(tmp.path())
            .args([
                "diff",
                &fixture_arg("old.yaml"),
                &fixture_arg("old.yaml"),
                "--format",
                format,
                "--quiet",
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn json_document_against_yaml_document() {
    let tmp = workspace();
    specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("new.json"),
            "--no-fail",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- missing endpoints\n  - DELETE /pets/{petId} operationId:deletePet\n  - GET /pets/{petId} operationId:showPetById\n",
        ));
}

#[test]
fn status_line_on_stderr() {
    let tmp = workspace();
    specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("old.yaml"),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains(": compatible ("));
}

#[test]
fn status_line_reports_incompatible_verdict() {
    let tmp = workspace();
    specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("new.yaml"),
            "--no-fail",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains(": incompatible ("));
}

#[test]
fn new_required_query_param_on_parameterless_endpoint_fails() {
    let tmp = workspace();
    let old = tmp.path().join("old.yaml");
    let new = tmp.path().join("new.yaml");
    std::fs::write(
        &old,
        "swagger: \"2.0\"\npaths:\n  /stores:\n    get:\n      operationId: listStores\n",
    )
    .unwrap();
    std::fs::write(
        &new,
        "swagger: \"2.0\"\npaths:\n  /stores:\n    get:\n      operationId: listStores\n      parameters:\n        - name: region\n          in: query\n          required: true\n          type: string\n",
    )
    .unwrap();

    specdiff_in(tmp.path())
        .args(["diff", old.to_str().unwrap(), new.to_str().unwrap(), "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "    - new required request param: query:region\n",
        ));
}

#[test]
fn env_var_selects_format() {
    let tmp = workspace();
    specdiff_in(tmp.path())
        .env("SPECDIFF_FORMAT", "csv")
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("new.yaml"),
            "--no-fail",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Endpoint,OperationId,Change,Category,Sub Category,Attribute\n",
        ));
}

#[test]
fn project_config_selects_report() {
    let tmp = workspace();
    std::fs::write(
        tmp.path().join(".specdiff.toml"),
        "[defaults]\nreport = \"changes\"\nfail_on_incompatible = false\n",
    )
    .unwrap();

    specdiff_in(tmp.path())
        .args([
            "diff",
            &fixture_arg("old.yaml"),
            &fixture_arg("new.yaml"),
            "--quiet",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("- new endpoints"));
}
