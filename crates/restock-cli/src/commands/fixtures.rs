//! Test fixtures shared by the command tests.

use std::fs;

use tempfile::TempDir;

/// Two companies, ALPHA and BETA, selling CAMISA (ACME) and BONE (GLOBEX).
pub fn manifest_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let write = |name: &str, content: &str| {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    };

    write("catalogo/catalog.csv", "sku,fornecedor\nCAMISA,ACME\nBONE,GLOBEX\n");
    write("catalogo/kit.csv", "kit,componente,quantidade\n");
    write(
        "alpha/full.csv",
        "sku,vendas_60d,estoque_full,em_transito\nCAMISA,90,0,0\nBONE,30,0,0\n",
    );
    write("alpha/fisico.csv", "sku,estoque,preco\nCAMISA,0,10\n");
    write("alpha/vendas.csv", "sku,quantidade\n");
    write("beta/full.csv", "sku,vendas_60d,estoque_full,em_transito\nCAMISA,30,0,0\n");
    write("beta/fisico.csv", "sku,estoque,preco\n");
    write("beta/vendas.csv", "sku,quantidade\nMEIA,4\n");
    write(
        "plan.json",
        r#"{"workbook": "catalogo", "companies": [
            {"name": "ALPHA", "fulfillment": "alpha/full.csv",
             "physical": "alpha/fisico.csv", "sales": "alpha/vendas.csv"},
            {"name": "BETA", "fulfillment": "beta/full.csv",
             "physical": "beta/fisico.csv", "sales": "beta/vendas.csv"}]}"#,
    );
    dir
}
