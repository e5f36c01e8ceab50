use super::field::{Field, FieldOption, OtherRelation};
use super::section::Section;
use super::Survey;
use crate::options;

const VILLES: &[FieldOption] = options![
    "Cotonou",
    "Porto-Novo",
    "Abomey-Calavi",
    "Parakou",
    "Djougou",
    "Bohicon",
    "Natitingou",
    "Ouidah",
    "Autre" => "Autre (préciser)",
];

const SITUATIONS: &[FieldOption] = options![
    "Étudiant" => "Étudiant(e)",
    "Salarié(e)",
    "Indépendant(e)",
    "Sans emploi",
    "Autre" => "Autre (préciser)",
];

const FREQUENCES: &[FieldOption] = options![
    "Tous les jours",
    "4-6 fois par semaine",
    "1-3 fois par semaine",
    "Rarement",
    "Jamais",
];

const TEMPS_PREPARATION: &[FieldOption] = options![
    "Moins de 30 minutes",
    "30 minutes - 1 heure",
    "1 heure - 2 heures",
    "Plus de 2 heures",
    "Je ne cuisine pas",
];

const TYPES_REPAS: &[FieldOption] = options![
    "Petit déjeuner",
    "Déjeuner",
    "Dîner",
    "Collations" => "Collations / En-cas",
    "Autre",
];

const DEFIS: &[FieldOption] = options![
    "Manque de temps pour cuisiner",
    "Coût élevé des repas extérieurs",
    "Préoccupation concernant l'hygiène des repas extérieurs",
    "Manque de variété dans les options disponibles",
    "Difficulté à trouver des repas sains et équilibrés",
    "Autre",
];

const INTERET: &[FieldOption] = options!["Oui", "Peut-être", "Non"];

const ASPECTS: &[FieldOption] = options![
    "Variété des menus",
    "Qualité des ingrédients",
    "Garantie d'hygiène",
    "Prix abordable",
    "Flexibilité des horaires de livraison",
    "Facilité de commande (application mobile)",
    "Support à l'économie locale (produits locaux)",
    "Autre",
];

const BUDGET_JOURNALIER: &[FieldOption] = options![
    "Moins de 1000 FCFA",
    "1000 - 1500 FCFA",
    "1500 - 2000 FCFA",
    "2000 - 2500 FCFA",
    "Plus de 2500 FCFA",
];

const PRIX_MAX: &[FieldOption] = options![
    "Moins de 500 FCFA",
    "500 - 750 FCFA",
    "750 - 1000 FCFA",
    "1000 - 1250 FCFA",
    "Plus de 1250 FCFA",
];

const BUDGET_MENSUEL: &[FieldOption] = options![
    "Moins de 15 000 FCFA",
    "15 000 - 25 000 FCFA",
    "25 000 - 35 000 FCFA",
    "35 000 - 45 000 FCFA",
    "Plus de 45 000 FCFA",
];

const FIELDS: &[Field] = &[
    Field::single("ville", "Dans quelle ville du Bénin résidez-vous ?", VILLES),
    Field::other("villeAutre", "Précisez votre ville"),
    Field::single(
        "situationProfessionnelle",
        "Quelle est votre situation professionnelle ?",
        SITUATIONS,
    ),
    Field::other("situationProfAutre", "Précisez votre situation"),
    Field::single(
        "mangeExterieurFreq",
        "Combien de fois par semaine mangez-vous généralement à l'extérieur (restaurants, maquis, rue) ?",
        FREQUENCES,
    ),
    Field::single(
        "tempsPreparationRepas",
        "Combien de temps en moyenne consacrez-vous chaque jour à la préparation de vos repas (courses, cuisine, vaisselle) ?",
        TEMPS_PREPARATION,
    ),
    Field::multi("typesRepas", "Quels types de repas consommez-vous habituellement ?", TYPES_REPAS),
    Field::other("typesRepasAutre", "Précisez le type de repas"),
    Field::multi(
        "defisAlimentation",
        "Quels sont les principaux défis que vous rencontrez concernant votre alimentation quotidienne ?",
        DEFIS,
    ),
    Field::other("defisAlimentationAutre", "Précisez le défi"),
    Field::scale(
        "satisfactionAccesRepas",
        "Dans quelle mesure êtes-vous satisfait(e) de la facilité d'accès à des repas abordables et de bonne qualité au quotidien ?",
        1,
        5,
    ),
    Field::single(
        "interetSolutionRepas",
        "Seriez-vous intéressé(e) par une solution qui vous permettrait de recevoir chaque jour des repas sains, variés et à un prix abordable, livrés directement chez vous ou sur votre lieu de travail ?",
        INTERET,
    ),
    Field::multi(
        "aspectsImportants",
        "Quels aspects seraient les plus importants pour vous dans une telle solution ?",
        ASPECTS,
    ),
    Field::other("aspectsImportantsAutre", "Précisez l'aspect important"),
    Field::single(
        "budgetJournalierRepas",
        "Quel est votre budget moyen par jour pour vos repas (petit-déjeuner, déjeuner et dîner) ?",
        BUDGET_JOURNALIER,
    ),
    Field::single(
        "prixMaxRepas",
        "Quel prix maximum seriez-vous prêt(e) à payer pour un repas (déjeuner ou dîner) de bonne qualité, livré à votre convenance ?",
        PRIX_MAX,
    ),
    Field::single(
        "budgetMensuelAbo",
        "Quel serait votre budget mensuel maximum pour un abonnement à un service proposant la livraison de repas quotidiens ?",
        BUDGET_MENSUEL,
    ),
    Field::text("commentaires", "Avez-vous d'autres suggestions ou commentaires ?"),
    Field::consent(
        "acceptePolitique",
        "J'ai lu et j'accepte la politique de confidentialité concernant le traitement de mes données personnelles.",
    ),
];

const SECTIONS: &[Section] = &[
    Section {
        ordinal: 1,
        title: "À propos de vous",
        fields: &["ville", "villeAutre", "situationProfessionnelle", "situationProfAutre"],
    },
    Section {
        ordinal: 2,
        title: "Vos habitudes alimentaires",
        fields: &["mangeExterieurFreq", "tempsPreparationRepas", "typesRepas", "typesRepasAutre"],
    },
    Section {
        ordinal: 3,
        title: "Vos besoins et défis",
        fields: &["defisAlimentation", "defisAlimentationAutre", "satisfactionAccesRepas"],
    },
    Section {
        ordinal: 4,
        title: "Intérêt pour une solution de repas",
        fields: &["interetSolutionRepas", "aspectsImportants", "aspectsImportantsAutre"],
    },
    Section {
        ordinal: 5,
        title: "Budget et prix",
        fields: &["budgetJournalierRepas", "prixMaxRepas", "budgetMensuelAbo"],
    },
    Section {
        ordinal: 6,
        title: "Commentaires",
        fields: &["commentaires", "acceptePolitique"],
    },
];

const OTHER_RELATIONS: &[OtherRelation] = &[
    OtherRelation { parent: "ville", other: "villeAutre" },
    OtherRelation { parent: "situationProfessionnelle", other: "situationProfAutre" },
    OtherRelation { parent: "typesRepas", other: "typesRepasAutre" },
    OtherRelation { parent: "defisAlimentation", other: "defisAlimentationAutre" },
    OtherRelation { parent: "aspectsImportants", other: "aspectsImportantsAutre" },
];

/// The meal-habits questionnaire served at `/`.
pub static MEAL_SURVEY: Survey = Survey {
    title: "Sondage sur les solutions de repas",
    intro: "Bonjour ! Nous réalisons une étude pour mieux comprendre les habitudes alimentaires \
            et les besoins des habitants de Cotonou et Abomey-Calavi. Vos réponses nous aideront \
            à développer des solutions de repas pratiques et adaptées à vos attentes. Vos \
            informations resteront confidentielles. Merci de votre participation !",
    fields: FIELDS,
    sections: SECTIONS,
    other_relations: OTHER_RELATIONS,
};
