/// Tone of the opening call and response.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DialogueMode {
    /// Official tone of the current Brazilian missal.
    #[default]
    Solemn,
    /// Widespread popular tone, borrowed from the final blessing.
    Regional,
}

impl DialogueMode {
    /// `"regional"` selects the regional tone; anything else is solemn.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "regional" => DialogueMode::Regional,
            _ => DialogueMode::Solemn,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DialogueMode::Solemn => "solemn",
            DialogueMode::Regional => "regional",
        }
    }

    pub fn gabc(self) -> &'static str {
        match self {
            DialogueMode::Solemn => SOLEMN,
            DialogueMode::Regional => REGIONAL,
        }
    }
}

const REGIONAL: &str = "<c><sp>V/</sp></c> O(h) Se(h)nhor(h) es(h)te(h)ja(f) con(h)vos(h)co.(h) (::) <c><sp>R/</sp></c> E(h)<e>le</e> es(h)tá(h) no(h) me(h)io(f) de(h) nós.(h) (::) (Z) <c><sp>V/</sp></c> Co(h)ra(h)ções(f) ao(h) al(h)to.(h) (::) <c><sp>R/</sp></c> O(h) nos(h)so(h) co(h)ra(h)cão(h) es(h)tá(f) em(h) Deus.(h) (::) (Z) <c><sp>V/</sp></c> De(h)mos(h) gra(h)ças(h) ao(h) Se(h)nhor(h) nos(f)so(h) Deus.(h) (::) <c><sp>R/</sp></c> É(h) nos(h)so(h) de(h)ver(h) e(h) nos(h)sa(h) sal(f)va(h)ção.(h) (::) (Z)";

const SOLEMN: &str = "<c><sp>V/</sp></c> O(f) Se(g)nhor(h) es(h)te(h)ja(f) con(g)vos(hg)co.(g) (::) <c><sp>R/</sp></c> E(f)<e>le</e> es(g)tá(h) no(h) me(h)io(f) de(g) nós.(hg) (::) (Z) <c><sp>V/</sp></c> Co(g)ra(h)ções(i) ao(h) al(gh)to.(gf) (::) <c><sp>R/</sp></c> O(h) nos(h)so(h) co(g)ra(h)cão(i) es(h)tá(g) em(h) Deus.(gf) (::) (Z) <c><sp>V/</sp></c> De(hg)mos(f) gra(fg)ças(h) ao(g) Se(h)nhor(ih) nos(gf)so(gh) Deus.(ghg) (::) <c><sp>R/</sp></c> É(g) no(g)sso(g) de(h)ver(i) e(h) nos(h)sa(g) sal(h)va(g)ção.(gf) (::) (Z)";
