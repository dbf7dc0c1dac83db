#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    EnumVariantNames,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TherapistId {
    Psicologo,
    Coach,
    ConselheiroEspiritual,
}

impl TherapistId {
    pub fn parse(text: &str) -> Option<TherapistId> {
        return TherapistId::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    EnumVariantNames,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionTypeId {
    ApoioEmocional,
    GestaoEstresse,
    Autoestima,
    Relacionamentos,
    Carreira,
    PropositoVida,
}

impl SessionTypeId {
    pub fn parse(text: &str) -> Option<SessionTypeId> {
        return SessionTypeId::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeColor {
    Purple,
    Blue,
    Indigo,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Therapist {
    pub id: TherapistId,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub personality: &'static str,
    pub specialties: &'static [&'static str],
    pub greeting: &'static str,
    pub color: ThemeColor,
    pub icon: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct SessionType {
    pub id: SessionTypeId,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PricingPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub price: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub limitations: &'static [&'static str],
    pub button_text: &'static str,
    pub popular: bool,
}

static THERAPISTS: [Therapist; 3] = [
    Therapist {
        id: TherapistId::Psicologo,
        name: "Ana",
        title: "Psicóloga Virtual",
        description: "Especialista em escuta ativa e abordagem humanística. Perfeita para questões emocionais profundas.",
        personality: "Empática, acolhedora e profissional",
        specialties: &["Ansiedade", "Depressão", "Autoestima", "Relacionamentos"],
        greeting: "Olá! Eu sou a Ana, sua psicóloga virtual. Estou aqui para te escutar sem julgamentos.",
        color: ThemeColor::Purple,
        icon: "♥",
    },
    Therapist {
        id: TherapistId::Coach,
        name: "Carlos",
        title: "Coach de Vida",
        description: "Focado em soluções práticas e crescimento pessoal. Ideal para superar desafios e alcançar objetivos.",
        personality: "Motivador, encorajador e orientado a resultados",
        specialties: &["Produtividade", "Metas", "Carreira", "Motivação"],
        greeting: "E aí! Eu sou o Carlos, seu coach pessoal. Vamos transformar desafios em oportunidades?",
        color: ThemeColor::Blue,
        icon: "◆",
    },
    Therapist {
        id: TherapistId::ConselheiroEspiritual,
        name: "Luz",
        title: "Conselheira Espiritual",
        description: "Oferece orientação baseada em sabedoria universal e amor incondicional. Para questões de propósito e significado.",
        personality: "Sábia, compassiva e inspiradora",
        specialties: &["Propósito", "Espiritualidade", "Paz interior", "Autoconhecimento"],
        greeting: "Namastê! Eu sou a Luz, sua guia espiritual. Que luz posso ajudar a despertar em você?",
        color: ThemeColor::Indigo,
        icon: "✦",
    },
];

static SESSION_TYPES: [SessionType; 6] = [
    SessionType {
        id: SessionTypeId::ApoioEmocional,
        name: "Apoio Emocional",
        description: "Para momentos difíceis e sentimentos intensos",
    },
    SessionType {
        id: SessionTypeId::GestaoEstresse,
        name: "Gestão de Estresse",
        description: "Técnicas para lidar com pressão e ansiedade",
    },
    SessionType {
        id: SessionTypeId::Autoestima,
        name: "Autoestima",
        description: "Fortalecer a confiança e amor próprio",
    },
    SessionType {
        id: SessionTypeId::Relacionamentos,
        name: "Relacionamentos",
        description: "Questões familiares, amorosas ou sociais",
    },
    SessionType {
        id: SessionTypeId::Carreira,
        name: "Carreira",
        description: "Decisões profissionais e crescimento",
    },
    SessionType {
        id: SessionTypeId::PropositoVida,
        name: "Propósito de Vida",
        description: "Encontrar significado e direção",
    },
];

static PRICING_PLANS: [PricingPlan; 3] = [
    PricingPlan {
        id: "free",
        name: "Gratuito",
        price: "R$ 0",
        period: "/mês",
        description: "Experimente o Desabafa.AI",
        features: &[
            "3 sessões gratuitas",
            "Acesso aos 3 terapeutas virtuais",
            "Chat por texto",
            "Conversas por voz",
            "Totalmente anônimo",
        ],
        limitations: &["Sem histórico de sessões", "Sem relatórios personalizados"],
        button_text: "Começar Grátis",
        popular: false,
    },
    PricingPlan {
        id: "premium",
        name: "Premium",
        price: "R$ 14,90",
        period: "/mês",
        description: "Acesso completo e ilimitado",
        features: &[
            "Sessões ilimitadas",
            "Histórico completo de conversas",
            "Relatórios semanais de progresso",
            "Insights personalizados da IA",
            "Acompanhamento emocional",
            "Suporte prioritário",
            "Novos terapeutas em primeira mão",
        ],
        limitations: &[],
        button_text: "Assinar Premium",
        popular: true,
    },
    PricingPlan {
        id: "pontual",
        name: "Apoio Pontual",
        price: "R$ 5,90",
        period: "/sessão",
        description: "Para momentos específicos",
        features: &[
            "1 sessão premium",
            "Insights aprofundados",
            "Relatório da sessão",
            "Recomendações personalizadas",
            "Válido por 7 dias",
        ],
        limitations: &["Sem histórico permanente"],
        button_text: "Comprar Sessão",
        popular: false,
    },
];

impl Therapist {
    pub fn all() -> &'static [Therapist] {
        return &THERAPISTS;
    }

    pub fn get(id: TherapistId) -> &'static Therapist {
        return THERAPISTS
            .iter()
            .find(|e| return e.id == id)
            .unwrap_or(&THERAPISTS[0]);
    }

    /// Display label used in session history, e.g. "Ana - Psicóloga Virtual".
    /// Unknown tags are returned untouched.
    pub fn label(tag: &str) -> String {
        if let Some(id) = TherapistId::parse(tag) {
            let therapist = Therapist::get(id);
            return format!("{} - {}", therapist.name, therapist.title);
        }

        return tag.to_string();
    }
}

impl SessionType {
    pub fn all() -> &'static [SessionType] {
        return &SESSION_TYPES;
    }

    pub fn get(id: SessionTypeId) -> &'static SessionType {
        return SESSION_TYPES
            .iter()
            .find(|e| return e.id == id)
            .unwrap_or(&SESSION_TYPES[0]);
    }

    pub fn label(tag: &str) -> String {
        if let Some(id) = SessionTypeId::parse(tag) {
            return SessionType::get(id).name.to_string();
        }

        return tag.to_string();
    }
}

impl PricingPlan {
    pub fn all() -> &'static [PricingPlan] {
        return &PRICING_PLANS;
    }

    pub fn find(id: &str) -> Option<&'static PricingPlan> {
        return PRICING_PLANS.iter().find(|e| return e.id == id);
    }
}
