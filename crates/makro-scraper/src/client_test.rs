use super::endpoint::{product_url_at, CatalogParams};
use super::*;

const T: i64 = 1_718_000_000_000;

#[test]
fn product_url_carries_every_query_parameter() {
    let url = product_url_at(
        "https://tienda.makro.es/",
        "BTY-X123456",
        &CatalogParams::default(),
        T,
    )
    .unwrap();
    assert_eq!(
        url.as_str(),
        "https://tienda.makro.es/evaluate.article.v1/betty-articles\
         ?ids=BTY-X123456&country=ES&locale=es-ES&storeIds=00057&details=true&__t=1718000000000"
    );
}

#[test]
fn product_url_uses_configured_store() {
    let params = CatalogParams {
        country: "PT".to_owned(),
        locale: "pt-PT".to_owned(),
        store_id: "00010".to_owned(),
    };
    let url = product_url_at("https://loja.makro.pt/", "BTY-X9", &params, T).unwrap();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("country".to_owned(), "PT".to_owned())));
    assert!(pairs.contains(&("locale".to_owned(), "pt-PT".to_owned())));
    assert!(pairs.contains(&("storeIds".to_owned(), "00010".to_owned())));
}

#[test]
fn product_url_on_bare_origin() {
    let url = product_url_at("http://127.0.0.1:8080", "BTY-X1", &CatalogParams::default(), T)
        .unwrap();
    assert_eq!(url.path(), "/evaluate.article.v1/betty-articles");
}

#[test]
fn product_url_keeps_base_path_with_trailing_slash() {
    let url = product_url_at(
        "https://tienda.makro.es/api/",
        "BTY-X1",
        &CatalogParams::default(),
        T,
    )
    .unwrap();
    assert_eq!(url.path(), "/api/evaluate.article.v1/betty-articles");
}

#[test]
fn product_url_escapes_the_identifier() {
    let url = product_url_at(
        "https://tienda.makro.es/",
        "BTY X&1",
        &CatalogParams::default(),
        T,
    )
    .unwrap();
    assert!(url.as_str().contains("ids=BTY+X%261&"));
}

#[test]
fn product_url_rejects_invalid_base() {
    for base in ["not-a-url", "", "mailto:shop@makro.es"] {
        let err = product_url_at(base, "BTY-X1", &CatalogParams::default(), T).unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidBaseUrl { .. }),
            "expected InvalidBaseUrl for {base:?}, got: {err:?}"
        );
    }
}

#[test]
fn default_params_target_the_spanish_store() {
    let params = CatalogParams::default();
    assert_eq!(params.country, "ES");
    assert_eq!(params.locale, "es-ES");
    assert_eq!(params.store_id, "00057");
}
