use crate::types::{GlobalStatus, Role};

/// Short hint telling the user what to do next, keyed by (role, status) with
/// a per-role default. Rejected cases are answered before the per-role table:
/// the admin is told the case can be reopened, everyone else that it is
/// read-only.
pub fn guidance(status: GlobalStatus, role: Role) -> &'static str {
    if status == GlobalStatus::Rejected {
        return match role {
            Role::Admin => "Ce dossier est refusé. Vous pouvez le réouvrir si nécessaire.",
            _ => "Ce dossier a été refusé et est en lecture seule.",
        };
    }

    match role {
        Role::Coordinator => match status {
            GlobalStatus::Draft => {
                "Soumettez ce dossier à la validation médicale du Dr Dubois."
            }
            GlobalStatus::MedicalMoreInfo => {
                "Le Dr Dubois demande des informations complémentaires. Consultez les messages."
            }
            GlobalStatus::CommercialInProgress => {
                "Confirmez le devis et la date proposée pour finaliser le dossier."
            }
            GlobalStatus::Scheduled => "Le dossier est programmé. Aucune action requise.",
            _ => "Le dossier est en cours de traitement.",
        },
        Role::Physician => match status {
            GlobalStatus::MedicalReview => {
                "Examinez le dossier et prenez une décision médicale."
            }
            GlobalStatus::MedicalMoreInfo => {
                "En attente de compléments d'information de Marcel."
            }
            _ => "Aucune action médicale requise pour le moment.",
        },
        Role::Partner => match status {
            GlobalStatus::CommercialInProgress => {
                "Gérez le devis et proposez des dates de chirurgie."
            }
            _ => "Suivez l'évolution du dossier.",
        },
        Role::Admin => "Vous avez accès complet à toutes les actions.",
    }
}
