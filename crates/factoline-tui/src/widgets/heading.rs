//! Page heading text: breadcrumb, title, result summary, empty state and
//! buying guide.

use ratatui::text::{Line, Span};

use crate::theme;

const LISTING_NAME: &str = "Planches de chêne";

pub const EMPTY_TITLE: &str = "Aucun résultat trouvé";
pub const SHOW_ALL: &str = "Afficher tous les produits";

pub const GUIDE_TITLE: &str = "Guide d'achat : Le Chêne pour les professionnels";
pub const GUIDE_TEXT: &str = "Le chêne est l'essence reine pour la menuiserie et \
l'ébénisterie. Sur Factoline, nous vous proposons exclusivement des bois issus de scieries \
françaises certifiées PEFC ou FSC. Que vous recherchiez du chêne avivé pour des parquets \
massifs, des plots pour de l'ameublement sur-mesure ou des poutres pour la restauration de \
charpente, notre réseau de partenaires garantit une hygrométrie contrôlée et des classements \
(QF1a, QF2...) respectant strictement les normes de l'industrie.";

/// `Accueil › Bois de construction › {Recherche | Planches de chêne}`.
pub fn breadcrumb(query: &str) -> Line<'static> {
    let last = if query.is_empty() {
        LISTING_NAME
    } else {
        "Recherche"
    };
    Line::from(vec![
        Span::styled("⌂ Accueil", theme::muted()),
        Span::styled(" › ", theme::key_hint()),
        Span::styled("Bois de construction", theme::muted()),
        Span::styled(" › ", theme::key_hint()),
        Span::styled(last, theme::value()),
    ])
}

pub fn title(query: &str) -> String {
    if query.is_empty() {
        format!("Tous les produits : {LISTING_NAME}")
    } else {
        format!("Résultats pour \"{query}\"")
    }
}

/// `"{n} produit professionnel disponible en stock"`, every word
/// pluralised when `n > 1`.
pub fn summary(count: usize) -> String {
    let s = if count > 1 { "s" } else { "" };
    format!("{count} produit{s} professionnel{s} disponible{s} en stock")
}

pub fn empty_message(query: &str) -> String {
    format!(
        "Nous n'avons trouvé aucun produit correspondant à \"{query}\". Essayez de vérifier \
         l'orthographe ou d'utiliser des termes plus génériques."
    )
}
