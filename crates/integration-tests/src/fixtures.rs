//! JSON entries shaped like CMS responses.

use serde_json::{Value, json};

/// Media entry with a small and a medium rendition.
#[must_use]
pub fn image(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": format!("{name}.jpg"),
        "url": format!("/uploads/{name}.jpg"),
        "alternativeText": null,
        "width": 1200,
        "height": 1500,
        "formats": {
            "small": { "url": format!("/uploads/small_{name}.jpg"), "width": 400, "height": 500 },
            "medium": { "url": format!("/uploads/medium_{name}.jpg"), "width": 800, "height": 1000 }
        }
    })
}

/// Full-price product tagged with `relation`.
#[must_use]
pub fn product(id: i64, slug: &str, name: &str, relation: &str, price: u32) -> Value {
    json!({
        "id": id,
        "documentId": format!("doc-{id}"),
        "slug": slug,
        "name": name,
        "brand": "Maison Nord",
        "originalPrice": price,
        "discountedPrice": null,
        "discountPercentage": null,
        "relation": relation,
        "sizes": ["S", "M", "L"],
        "estimatedDeliveryMin": "2025-10-03",
        "estimatedDeliveryMax": "2025-10-17",
        "images": [image(id * 10, slug)],
        "avaliableIn": [],
        "productDetail": [{
            "id": id * 100,
            "highlights": "Double-faced wool\nTwo patch pockets",
            "composition_outer": "100% wool",
            "composition_lining": null,
            "washing_instructions": "Dry clean only",
            "wearing_info": null
        }]
    })
}

/// Product with a discounted price.
#[must_use]
pub fn sale_product(
    id: i64,
    slug: &str,
    name: &str,
    relation: &str,
    price: u32,
    discounted: u32,
) -> Value {
    let mut entry = product(id, slug, name, relation, price);
    entry["discountedPrice"] = json!(discounted);
    entry
}

/// Banner tagged with `relation`.
#[must_use]
pub fn banner(id: i64, relation: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "ctaText": "Discover",
        "position": "left",
        "relation": relation,
        "image": image(id * 10, &format!("banner-{relation}"))
    })
}

/// Home section with the given sort order.
#[must_use]
pub fn home_section(id: i64, title: &str, order: i32) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "button_text": "Shop now",
        "layout": "right",
        "order": order,
        "image": image(id * 10, &format!("section-{id}"))
    })
}
