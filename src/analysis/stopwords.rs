//! Stopword lists for word frequency counts.
//!
//! Both lists are sorted so membership is a binary search.

use crate::config::StopwordList;

/// Slovene function words: pronouns, prepositions, conjunctions, numerals.
pub const SLOVENE: &[&str] = &[
    "a", "ali", "b", "bi", "bil", "bila", "bile", "bili", "bilo", "biti", "blizu", "bo", "bodo",
    "bojo", "bolj", "bom", "bomo", "boste", "bova", "boš", "brez", "c", "cel", "cela", "celi",
    "celo", "d", "da", "datum", "deset", "deseta", "deseti", "deseto", "devet", "deveta",
    "deveti", "deveto", "do", "dokler", "dol", "dolg", "dolga", "dolgi", "dovolj", "drug",
    "druga", "drugi", "drugo", "dva", "dve", "e", "eden", "en", "ena", "ene", "eni", "enkrat",
    "eno", "etc.", "f", "foto", "g", "g.", "ga", "ga.", "gor", "h", "i", "idr.", "ii", "iii",
    "in", "iv", "ix", "iz", "j", "jaz", "je", "ji", "jih", "jim", "jo", "jutri", "k", "kadar",
    "kadarkoli", "kaj", "kajti", "kako", "kakor", "kakorkoli", "kakršen", "kakršenkoli",
    "kakršnega", "kakršnegakoli", "kakršnemu", "kakršnemukoli", "kakršnim", "kakršnimkoli",
    "kakšen", "kakšenkoli", "kakšna", "kakšnakoli", "kakšne", "kakšnega", "kakšnegakoli",
    "kakšnekoli", "kakšnem", "kakšnemkoli", "kakšnemu", "kakšnemukoli", "kakšni", "kakšnih",
    "kakšnihkoli", "kakšnikoli", "kakšnim", "kakšnimkoli", "kakšno", "kakšnokoli", "kamor",
    "kamorkoli", "kar", "karkoli", "katera", "katerakoli", "katere", "katerega", "kateregakoli",
    "katerekoli", "kateremu", "kateremukoli", "kateri", "katerikoli", "katerim", "katerimkoli",
    "katero", "katerokoli", "kdaj", "kdajkoli", "kdo", "kdor", "kdorkoli", "ker", "ki", "kje",
    "kjer", "kjerkoli", "ko", "koder", "koderkoli", "koga", "kogar", "kogarkoli", "koli",
    "komu", "komur", "komurkoli", "kot", "l", "le", "m", "malce", "malo", "manj", "me", "med",
    "medtem", "mene", "mi", "midva", "midve", "mnogo", "moj", "moja", "moje", "mora", "morajo",
    "moram", "moramo", "morate", "moraš", "morem", "mu", "n", "na", "nad", "naj", "najina",
    "najino", "najmanj", "naju", "največ", "nam", "nas", "nato", "nazaj", "naš", "naša", "naše",
    "ne", "nek", "neka", "nekaj", "nekatere", "nekateri", "nekatero", "nekdo", "neke", "nekega",
    "neki", "nekje", "neko", "nekoga", "nekoč", "ni", "nikamor", "nikdar", "nikjer", "nikoli",
    "nič", "nje", "njega", "njegov", "njegova", "njegovo", "njej", "njemu", "njen", "njena",
    "njeno", "nji", "njih", "njihov", "njihova", "njihovo", "njiju", "njim", "njo", "njun",
    "njuna", "njuno", "no", "nocoj", "npr.", "o", "ob", "oba", "obe", "oboje", "od", "okoli",
    "on", "onadva", "one", "oni", "onidve", "osem", "osma", "osmi", "osmo", "oz.", "p", "pa",
    "pet", "peta", "peti", "peto", "po", "pod", "pogosto", "poleg", "poln", "polna", "polni",
    "polno", "ponavadi", "ponovno", "potem", "povsod", "prbl.", "precej", "pred", "prej",
    "preko", "pri", "pribl.", "približno", "prva", "prvi", "prvo", "r", "ravno", "redko", "res",
    "reč", "s", "saj", "sam", "sama", "same", "sami", "samo", "se", "sebe", "sebi", "sedaj",
    "sedem", "sedma", "sedmi", "sedmo", "sem", "seveda", "si", "sicer", "skoraj", "skozi",
    "smo", "so", "spet", "sta", "ste", "sva", "t", "ta", "tak", "taka", "take", "taki", "tako",
    "takoj", "tam", "te", "tebe", "tebi", "tega", "tem", "ter", "ti", "tista", "tiste", "tisti",
    "tisto", "tj.", "tja", "to", "toda", "tretja", "tretje", "tretji", "tri", "tu", "tudi",
    "tukaj", "tvoj", "tvoja", "tvoje", "u", "v", "vaju", "vam", "vas", "vaš", "vaša", "vaše",
    "ve", "vedno", "vendar", "ves", "več", "vi", "vidva", "vii", "viii", "vsa", "vsaj", "vsak",
    "vsaka", "vsakdo", "vsake", "vsaki", "vsakomur", "vse", "vsega", "vsi", "vso", "včasih",
    "včeraj", "x", "z", "za", "zadaj", "zadnji", "zakaj", "zaradi", "zato", "zdaj", "zelo",
    "zunaj", "č", "če", "čegar", "čegarkoli", "čemur", "čemurkoli", "česar", "česarkoli",
    "često", "četrta", "četrti", "četrto", "čez", "čigar", "čigarkoli", "čigav", "š", "še",
    "šest", "šesta", "šesti", "šesto", "štiri", "ž", "že",
];

/// The ad-server list: most of the function words, extended with months,
/// weekdays, digits and recurring site boilerplate.
pub const ADSERVER: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ":", "a", "ali", "apr", "april", "aprila",
    "avg", "avgust", "b", "bi", "bil", "bila", "bile", "bili", "bilo", "biti", "blizu", "bo",
    "bodo", "bojo", "bolj", "bom", "bomo", "bosta", "boste", "bova", "boš", "brez", "c", "cel",
    "cela", "celi", "celo", "d", "da", "daleč", "dalje", "dan", "danes", "datum", "dec",
    "december", "del", "dela", "deset", "deseta", "deseti", "deseto", "devet", "deveta",
    "deveti", "deveto", "dnevi", "dni", "do", "dober", "dobra", "dobri", "dobro", "dodaten",
    "dogodku", "dokler", "dokončna", "dol", "dolg", "dolga", "dolgi", "doo", "dopolnil",
    "dovolj", "drug", "druga", "drugi", "drugih", "drugo", "družbi", "država", "državni", "ds",
    "dva", "dve", "dveh", "e", "eden", "en", "ena", "ene", "enega", "eni", "enkrat", "eno",
    "etc.", "evrov", "f", "false", "feb", "februar", "function", "g", "g.", "ga", "ga.",
    "glede", "gor", "gospa", "gospod", "gre", "h", "halo", "hitreje", "i", "idr.", "if", "ih",
    "ii", "iii", "il", "ima", "imajo", "imata", "in", "iv", "ix", "iz", "izbora", "izboru",
    "izjemen", "j", "jan", "januar", "jaz", "je", "ji", "jih", "jim", "jo", "js", "jul",
    "julij", "jun", "junij", "junija", "jutri", "k", "kadarkoli", "kaj", "kajti", "kako",
    "kakor", "kakovosti", "kakšne", "kamor", "kamorkoli", "kar", "karkoli", "kategorija",
    "kateri", "katerikoli", "katero", "kdaj", "kdo", "kdorkoli", "ker", "ki", "kje", "kjer",
    "kjerkoli", "klikov", "ko", "koder", "koderkoli", "koga", "kombinacija", "komentarjev",
    "komu", "konec", "kot", "kratek", "kratka", "kratke", "kratki", "l", "lahka", "lahke",
    "lahki", "lahko", "lani", "le", "lep", "lepa", "lepe", "lepi", "lepo", "let", "leta",
    "letih", "letno", "leto", "letos", "letu", "linija", "ljubljani", "ljubljano", "ljudi", "m",
    "maj", "maja", "majhen", "majhna", "majhni", "malce", "malo", "manj", "mar", "marca",
    "marec", "me", "med", "medtem", "meje", "mene", "mesec", "mestu", "mi", "midva", "midve",
    "milijona", "mnogo", "mo", "mogoče", "moj", "moja", "moje", "mora", "morajo", "moram",
    "moramo", "morate", "moraš", "morda", "more", "morem", "moremo", "mu", "n", "na", "nad",
    "naj", "najbolj", "najboljša", "najdisi", "najina", "najino", "najmanj", "najpogosteje",
    "naju", "najugodnejši", "največ", "največkrat", "nam", "namreč", "narediti", "narobe",
    "narod", "nas", "nastop", "nastopila", "nato", "nazaj", "način", "naš", "naša", "naše",
    "ne", "nedavno", "nedelja", "nek", "neka", "nekaj", "nekatere", "nekateri", "nekatero",
    "nekdanji", "nekdo", "neke", "nekega", "neki", "nekje", "neko", "nekoga", "nekoč", "net",
    "ni", "nikamor", "nikdar", "nikjer", "nikoli", "nima", "nista", "niste", "nič", "nje",
    "njega", "njegov", "njegova", "njegovo", "njej", "njemu", "njen", "njena", "njeno", "nji",
    "njih", "njihov", "njihova", "njihovo", "njiju", "njim", "njo", "njun", "njuna", "njuno",
    "no", "nocoj", "nov", "nova", "nove", "novega", "november", "novi", "novice", "novih",
    "novim", "novimi", "novo", "npr.", "o", "ob", "oba", "obe", "oboje", "od", "odločitev",
    "odprl", "odprt", "odprta", "odprti", "ogo", "okoli", "okt", "oktober", "on", "onadva",
    "one", "oni", "onidve", "or", "osem", "osma", "osmi", "osmo", "oz.", "oziroma", "p", "pa",
    "pač", "pet", "peta", "petek", "peti", "peto", "planet", "po", "pod", "pogosto", "pokala",
    "poleg", "poln", "polna", "polni", "polno", "ponavadi", "ponedeljek", "ponovno", "ponuja",
    "potem", "povsod", "pozdravljen", "pozdravljeni", "počasi", "prav", "prava", "prave",
    "pravi", "pravijo", "pravimi", "pravo", "prazen", "prazna", "prazno", "prbl.", "precej",
    "pred", "predstavili", "predvsem", "prehodih", "prej", "prek", "preko", "premagan", "pri",
    "pribl.", "približek", "približno", "pridete", "prikaže", "prilo", "priložnost", "primer",
    "primera", "pripravljen", "pripravljena", "pripravljeni", "proti", "prva", "prvi", "prvič",
    "prvo", "r", "ra", "rada", "ravno", "razkrivamo", "redko", "res", "reč", "rešil", "s",
    "saj", "sam", "sama", "same", "sami", "samo", "se", "sebe", "sebi", "sedaj", "sedem",
    "sedma", "sedmi", "sedmo", "sem", "sep", "september", "seveda", "seštevek", "si", "sicer",
    "siolnet", "skoraj", "skozi", "skupnega", "skupni", "slab", "slovenija", "slovenije",
    "sloveniji", "slovenijo", "slovenka", "slovenska", "slovenske", "slovenskem", "slovenski",
    "slovenskih", "smo", "so", "sobota", "soboto", "spet", "spletu", "sprejela", "sprejet",
    "sprejeti", "sreda", "srednja", "srednji", "sredo", "sta", "ste", "storitve", "stran",
    "stvar", "sva", "svet", "svetu", "svoj", "svoje", "svojem", "svojo", "t", "ta", "tak",
    "taka", "take", "taki", "tako", "takoj", "tam", "te", "tebe", "tebi", "teden", "tedna",
    "tega", "tekmi", "tem", "ter", "termometer", "težak", "težka", "težki", "težko", "ti",
    "tisoč", "tista", "tiste", "tisti", "tisto", "tj.", "tja", "to", "toda", "tokrat", "torek",
    "tr", "treba", "treh", "trenutno", "tretja", "tretje", "tretji", "tri", "true", "tu",
    "tudi", "tukaj", "tvoj", "tvoja", "tvoje", "u", "udari", "udarila", "ujemata", "upreti",
    "uredi", "v", "vaju", "vam", "var", "vas", "vaš", "vaša", "vaše", "vašem", "ve", "vedeti",
    "vedno", "velik", "velika", "veliki", "veliko", "vendar", "ves", "več", "večji", "vi",
    "video", "vidva", "vii", "viii", "visok", "visoka", "visoke", "visoki", "vprašanje",
    "vrača", "vroč", "vroča", "vsa", "vsaj", "vsak", "vsaka", "vsakdo", "vsake", "vsakem",
    "vsaki", "vsakomur", "vse", "vsega", "vseh", "vsi", "vso", "včasih", "včeraj", "x", "z",
    "za", "zadaj", "zadnji", "zadnjih", "zakaj", "zaprta", "zaprti", "zaprto", "zaradi", "zato",
    "zda", "zdaj", "združuje", "zelo", "zgodaj", "zgolj", "zna", "znan", "znova", "zunaj", "č",
    "čas", "če", "čeprav", "često", "četrta", "četrtek", "četrti", "četrto", "čez", "čigav",
    "čim", "članek", "š", "še", "šest", "šesta", "šesti", "šesto", "števila", "štiri", "ž",
    "že",
];

pub fn words(list: StopwordList) -> &'static [&'static str] {
    match list {
        StopwordList::Slovene => SLOVENE,
        StopwordList::Adserver => ADSERVER,
    }
}

pub fn is_stopword(stopwords: &[&str], word: &str) -> bool {
    stopwords.binary_search(&word).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_are_sorted() {
        assert!(SLOVENE.windows(2).all(|w| w[0] < w[1]));
        assert!(ADSERVER.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_lookup() {
        assert!(is_stopword(SLOVENE, "in"));
        assert!(is_stopword(SLOVENE, "že"));
        assert!(!is_stopword(SLOVENE, "nogomet"));
        assert!(is_stopword(ADSERVER, "december"));
        assert!(!is_stopword(SLOVENE, "december"));
    }

    #[test]
    fn test_selection() {
        assert_eq!(words(StopwordList::Slovene).len(), SLOVENE.len());
        assert!(words(StopwordList::Adserver).len() > SLOVENE.len());
    }
}
