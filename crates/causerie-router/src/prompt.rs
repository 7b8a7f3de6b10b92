// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt text for the classification and composition calls.
//!
//! The assistant speaks French, so every model-facing and user-facing string
//! here is French.

use causerie_core::types::{StockQuote, WeatherReport};

use crate::tools::{ToolKind, ToolToggles};

const PREAMBLE: &str = "Tu es un assistant. Analyse la demande de l'utilisateur.";

const WEATHER_RULE: &str = "- Si la demande de l'utilisateur concerne la météo pour une ville spécifique \
(par exemple, \"quel temps fait-il à Lyon ?\"), tu dois répondre SEULEMENT avec un objet JSON au format: \
{\"tool\": \"get_weather\", \"city\": \"nom_de_la_ville\"}.";

const SEARCH_RULE: &str = "- Si la demande concerne une recherche web, des informations actuelles, des nouvelles, \
des définitions, ou tout sujet nécessitant une recherche (par exemple, \"cherche dans le web\", \
\"dernières nouvelles\", \"what is\", \"define\"), tu dois répondre SEULEMENT avec un objet JSON au format: \
{\"tool\": \"web_search\", \"query\": \"termes de recherche appropriés\"}.";

const STOCK_RULE: &str = "- Si la demande concerne la finance, les actions, le marché boursier, ou des symboles \
financiers (par exemple, \"prix de l'action Apple\", \"cours de AAPL\", \"marché financier\"), tu dois répondre \
SEULEMENT avec un objet JSON au format: {\"tool\": \"get_stock\", \"symbol\": \"SYMBOLE\"}.";

const PLAIN_RULE: &str = "- Pour toute autre question ou salutation (comme \"bonjour\", \"qui es-tu ?\"), \
tu dois répondre comme un assistant normal, en texte clair, SANS utiliser de JSON.";

const CLOSING: &str = "IMPORTANT: Quand tu génères un JSON, assure-toi qu'il soit valide et complet.";

/// System instruction for the classification call, listing only enabled tools.
pub fn system_prompt(toggles: &ToolToggles) -> String {
    let mut lines = vec![PREAMBLE];
    for kind in toggles.enabled() {
        lines.push(match kind {
            ToolKind::Weather => WEATHER_RULE,
            ToolKind::WebSearch => SEARCH_RULE,
            ToolKind::Stock => STOCK_RULE,
        });
    }
    lines.push(PLAIN_RULE);
    lines.push("");
    lines.push(CLOSING);
    lines.join("\n")
}

/// Intermediate assistant turn announcing the lookup.
pub fn acknowledgment(kind: ToolKind, argument: &str) -> String {
    match kind {
        ToolKind::Weather => format!("Ok, je vais chercher la météo pour {argument}."),
        ToolKind::WebSearch => format!("Je vais rechercher des informations sur \"{argument}\"."),
        ToolKind::Stock => format!("Je vais chercher les données financières pour {argument}."),
    }
}

/// Composition instruction grounded in a weather report.
pub fn weather_composition(user_text: &str, report: &WeatherReport) -> String {
    let data = serde_json::to_string(report).unwrap_or_default();
    format!(
        "L'utilisateur a demandé : \"{user_text}\".\n\
         J'ai récupéré ces données météo : {data}.\n\
         Formule une réponse naturelle, amicale et concise et avec emojis en français pour l'utilisateur.\n\
         Par exemple: \"Actuellement à Lyon, le ciel est dégagé et il fait 19.5°C.\""
    )
}

/// Composition instruction grounded in formatted search results.
pub fn search_composition(user_text: &str, results: &str) -> String {
    format!(
        "L'utilisateur a demandé : \"{user_text}\".\n\
         J'ai effectué une recherche web et voici les résultats :\n\
         {results}\n\n\
         Formule une réponse naturelle, informative et concise en français pour l'utilisateur \
         en te basant sur ces informations."
    )
}

/// Composition instruction grounded in a stock quote.
pub fn stock_composition(user_text: &str, quote: &StockQuote) -> String {
    let data = serde_json::to_string(quote).unwrap_or_default();
    format!(
        "L'utilisateur a demandé : \"{user_text}\".\n\
         J'ai récupéré ces données financières : {data}.\n\
         Formule une réponse naturelle, informative et concise en français pour l'utilisateur \
         avec des emojis appropriés.\n\
         Par exemple: \"L'action {} se négocie actuellement à {}$ avec une variation de {}%.\"",
        quote.symbol, quote.price, quote.change_percent
    )
}

/// Reply used when the weather collaborator fails.
pub fn weather_apology(message: &str) -> String {
    format!("Désolé, je n'ai pas pu récupérer la météo : {message}")
}

/// Reply used when the finance collaborator fails.
pub fn stock_apology(message: &str) -> String {
    format!("Désolé, je n'ai pas pu récupérer les données financières : {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_offers_only_weather() {
        let prompt = system_prompt(&ToolToggles::default());
        assert!(prompt.contains("get_weather"));
        assert!(!prompt.contains("web_search"));
        assert!(!prompt.contains("get_stock"));
        assert!(prompt.contains("SANS utiliser de JSON"));
    }

    #[test]
    fn enabled_tools_are_listed() {
        let prompt = system_prompt(&ToolToggles::new(true, true));
        let weather = prompt.find("get_weather").unwrap();
        let search = prompt.find("web_search").unwrap();
        let stock = prompt.find("get_stock").unwrap();
        assert!(weather < search && search < stock);
    }

    #[test]
    fn finance_without_search() {
        let prompt = system_prompt(&ToolToggles::new(false, true));
        assert!(prompt.contains("get_stock"));
        assert!(!prompt.contains("web_search"));
    }

    #[test]
    fn acknowledgments() {
        assert_eq!(
            acknowledgment(ToolKind::Weather, "Lyon"),
            "Ok, je vais chercher la météo pour Lyon."
        );
        assert_eq!(
            acknowledgment(ToolKind::WebSearch, "rust 2024"),
            "Je vais rechercher des informations sur \"rust 2024\"."
        );
    }

    #[test]
    fn weather_composition_embeds_payload() {
        let report = WeatherReport {
            city: "Lyon".into(),
            country: "FR".into(),
            temperature: 19.5,
            feels_like: 19.0,
            description: "ciel dégagé".into(),
            icon: "01d".into(),
        };
        let prompt = weather_composition("quel temps à Lyon ?", &report);
        assert!(prompt.contains("\"quel temps à Lyon ?\""));
        assert!(prompt.contains("\"city\":\"Lyon\""));
        assert!(prompt.contains("\"temperature\":19.5"));
    }

    #[test]
    fn apologies_embed_message() {
        assert_eq!(
            weather_apology("city not found"),
            "Désolé, je n'ai pas pu récupérer la météo : city not found"
        );
        assert!(stock_apology("Stock symbol \"ZZZ\" not found.").ends_with("not found."));
    }
}
